//! ANSI terminal output using crossterm's 24-bit colours.
//!
//! Renders the same groups as the HTML output, so a block looks the same in a terminal as
//! on a page. Uncoloured groups are written as-is.

use super::registry::Formatter;
use crate::highlight::config::{HighlightConfig, Palette};
use crate::highlight::error::FormatError;
use crate::highlight::folding::{group, Group, LiteralPiece};
use crate::highlight::token::{Colour, TokenKind, TokenStream};
use crossterm::style::{Color, Stylize};

fn paint(text: &str, colour: Colour, palette: &Palette) -> String {
    match palette.rgb(colour) {
        Some((r, g, b)) => text.with(Color::Rgb { r, g, b }).to_string(),
        None => text.to_string(),
    }
}

/// Render tokens as ANSI-coloured text.
pub fn to_ansi(tokens: &TokenStream, config: &HighlightConfig) -> String {
    let palette = &config.palette;
    let mut out = String::new();
    for group in group(tokens) {
        match &group {
            Group::Literal { pieces, .. } => {
                for piece in pieces {
                    match piece {
                        LiteralPiece::Text(text) => {
                            out.push_str(&paint(text, group.colour(), palette))
                        }
                        LiteralPiece::Escape(text) => {
                            out.push_str(&paint(text, TokenKind::Escape.colour(), palette))
                        }
                    }
                }
            }
            Group::Token {
                kind: TokenKind::Comment,
                text,
            } => {
                let (r, g, b) = palette.rgb(Colour::Grey).unwrap_or((128, 128, 128));
                out.push_str(&text.as_str().with(Color::Rgb { r, g, b }).italic().to_string());
            }
            _ => out.push_str(&paint(&group.text(), group.colour(), palette)),
        }
    }
    out
}

pub struct AnsiFormatter;

impl Formatter for AnsiFormatter {
    fn name(&self) -> &str {
        "ansi"
    }

    fn serialize(
        &self,
        tokens: &TokenStream,
        config: &HighlightConfig,
    ) -> Result<String, FormatError> {
        Ok(to_ansi(tokens, config))
    }

    fn description(&self) -> &str {
        "Terminal text with 24-bit ANSI colours"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::lexing::tokenize;

    fn strip_ansi(text: &str) -> String {
        let pattern = regex::Regex::new(r"\x1b\[[0-9;]*m").unwrap();
        pattern.replace_all(text, "").into_owned()
    }

    #[test]
    fn test_plain_text_is_unstyled() {
        assert_eq!(to_ansi(&tokenize("x = y"), &HighlightConfig::default()), "x = y");
    }

    #[test]
    fn test_keywords_are_coloured() {
        if std::env::var_os("NO_COLOR").is_some() {
            return;
        }
        let out = to_ansi(&tokenize("let x"), &HighlightConfig::default());
        // #cf6a00
        assert!(out.contains("38;2;207;106;0"), "{out:?}");
        assert_eq!(strip_ansi(&out), "let x");
    }

    #[test]
    fn test_text_survives_styling() {
        let source = "fn f<'a>(s: &'a str) -> String { \"\\t\".into() } // done";
        let out = to_ansi(&tokenize(source), &HighlightConfig::default());
        assert_eq!(strip_ansi(&out), source);
    }
}
