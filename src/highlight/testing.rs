//! Test helpers for building expected token streams.
//!
//! Tests compare full token sequences rather than counts: a highlighter bug almost always
//! shows up as one misclassified token in the middle of an otherwise right stream, and the
//! full sequence makes the diff obvious.

use crate::highlight::lexing::tokenize;
use crate::highlight::token::{Token, TokenKind};

/// Build tokens from `(kind, text)` pairs.
pub fn mk_tokens(pairs: &[(TokenKind, &str)]) -> Vec<Token> {
    pairs
        .iter()
        .map(|(kind, text)| Token::new(*kind, *text))
        .collect()
}

/// Token kinds of a tokenized source, in order.
pub fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).kinds()
}

/// One `KIND text` line per token, for readable snapshots.
pub fn token_lines(source: &str) -> String {
    tokenize(source)
        .iter()
        .map(|token| format!("{} {:?}", token.kind, token.text))
        .collect::<Vec<_>>()
        .join("\n")
}
