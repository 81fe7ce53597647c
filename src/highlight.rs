//! Main module for rustlight library functionality

pub mod config;
pub mod error;
pub mod escape;
pub mod folding;
pub mod formats;
pub mod heuristics;
pub mod keywords;
pub mod lexing;
pub mod page;
pub mod testing;
pub mod token;

pub use self::config::{load_defaults, HighlightConfig, Loader, Markup, Palette};
pub use error::{ConfigError, FormatError, PageError};
pub use escape::{escape_html, inner_text, unescape_html};
pub use folding::{fold, fold_with, group, Group};
pub use formats::{FormatRegistry, Formatter};
pub use lexing::tokenize;
pub use page::{CodeBlock, PageHighlighter};
pub use token::{Colour, Token, TokenKind, TokenStream};

/// Tokenize and render one block of source text as an HTML fragment.
pub fn highlight(source: &str) -> String {
    fold(&tokenize(source))
}
