//! # rustlight
//!
//! A syntax highlighter for Rust snippets embedded in documentation pages.
//!
//! A code block goes through two passes:
//!
//! 1. [tokenize] scans the text once, character by character, and produces a flat
//!    [TokenStream](highlight::TokenStream) of classified tokens.
//! 2. [fold] merges the tokens into colour groups and renders them as HTML spans.
//!
//! The [page](highlight::page) pass applies both to every code block of an HTML page.
//! Other output formats (ANSI, token dumps) are available through the
//! [FormatRegistry](highlight::FormatRegistry).
//!
//! The highlighter is lexical only: it never validates its input and never fails.

pub mod highlight;

pub use highlight::{fold, highlight, tokenize};
