//! Character classification for the lexer
//!
//! This module provides the raw classification using the logos lexer library. Every logos
//! token matches exactly one character, so the output is one `(CharClass, char)` pair per
//! source character. The state machine in [lexer](super::lexer) decides what the characters
//! mean; this layer only answers "what kind of character is this".

use logos::Logos;
use serde::Serialize;

/// Character classes the transition table dispatches on.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CharClass {
    #[token("\n")]
    Newline,

    #[regex(r"[ \t\r]")]
    Space,

    #[token("/")]
    Slash,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("\"")]
    DoubleQuote,
    #[token("'")]
    SingleQuote,
    #[token("\\")]
    Backslash,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("&")]
    Ampersand,
    #[token("-")]
    Minus,

    // Identifier characters
    #[regex(r"[A-Za-z0-9_]")]
    Word,

    // Operators, sigils and any non-ASCII character
    #[regex(r#"[^\n \t\r/(){}\[\]<>"'\\.:;,&\-A-Za-z0-9_]"#)]
    Other,
}

impl CharClass {
    /// Check if this class is whitespace (including newlines)
    pub fn is_space(self) -> bool {
        matches!(self, CharClass::Space | CharClass::Newline)
    }
}

/// Classify every character of `source`.
///
/// Input logos cannot match falls back to [CharClass::Other] so no character is lost.
pub fn classify(source: &str) -> Vec<(CharClass, char)> {
    let mut lexer = CharClass::lexer(source);
    let mut classes = Vec::with_capacity(source.len());

    while let Some(result) = lexer.next() {
        let class = result.unwrap_or(CharClass::Other);
        classes.extend(lexer.slice().chars().map(|c| (class, c)));
    }

    classes
}
