//! Lexer
//!
//! This module turns the text of one code block into a flat, ordered [TokenStream](crate::highlight::token::TokenStream).
//!
//! Structure:
//!     The tokenization is done in two layers. The logos lexer in [char_classes] classifies
//! every character. The state machine in [lexer] then walks the classified characters once,
//! keeping a token history, a state stack and an accumulation buffer.
//!
//! The pipeline consists of:
//! 1. Character classification using logos ./char_classes.rs
//! 2. Dispatch through the transition table ./transitions.rs
//! 3. Action application and end-of-input flushing ./lexer.rs
//!
//! Context Handling
//!
//!     The same character means different things in different places: `<` opens a generic
//!     list after `Vec` but is a comparison after a space, `:` is a type annotation unless a
//!     second colon follows, `'` starts a char literal or a lifetime. The lexer resolves these
//!     with three inputs only: the top of the state stack, the last two emitted tokens and one
//!     character of lookahead. Some decisions are revised after the fact by rewriting the last
//!     token (a pending `:` becomes `::`, `(` becomes the open half of a unit `()`).
//!
//!     The output is best-effort. Nothing here validates the input, and on anything the table
//!     does not recognise the lexer falls back to accumulating a plain word.
//!
//! Guarantees
//!
//!     - tokenization never fails and never panics
//!     - concatenating the token texts reproduces the source exactly
//!     - no token has empty text
//!     - unterminated strings, chars, comments and generic lists are flushed as tokens of
//!       their kind at end of input

pub mod char_classes;
pub mod lexer;
pub mod state;
pub mod transitions;

pub use char_classes::{classify, CharClass};
pub use lexer::{tokenize, Lexer};
pub use state::{LexState, StateStack};
