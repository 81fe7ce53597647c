//! Fold pass: token stream to display groups to HTML.
//!
//!     The lexer is fine-grained (one token per space, separate open/content/close tokens for
//!     literals). Rendering one span per token would produce noisy markup, so tokens are first
//!     folded into [Group]s:
//!
//!     - consecutive tokens without a colour merge into one plain group
//!     - a whole string or char literal becomes one group, escapes kept as nested pieces
//!     - a `TYPE` or `NAME` whose text was declared as a type parameter earlier in the block is
//!       coloured like the parameter
//!
//!     Every other coloured token is a group of its own. Group texts, in order, reproduce the
//!     token texts, so [crate::highlight::escape::inner_text] of the rendered markup is the
//!     original source.

use crate::highlight::config::{HighlightConfig, Markup};
use crate::highlight::escape::escape_html;
use crate::highlight::token::{Colour, Token, TokenKind, TokenStream};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    String,
    Char,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralPiece {
    Text(String),
    Escape(String),
}

impl LiteralPiece {
    pub fn text(&self) -> &str {
        match self {
            LiteralPiece::Text(text) | LiteralPiece::Escape(text) => text,
        }
    }
}

/// One rendered span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Group {
    /// Uncoloured run: whitespace, punctuation, plain names.
    Plain(String),
    Token { kind: TokenKind, text: String },
    /// A use of a previously declared type parameter.
    TypeReference(String),
    Literal {
        kind: LiteralKind,
        pieces: Vec<LiteralPiece>,
    },
}

impl Group {
    pub fn text(&self) -> String {
        match self {
            Group::Plain(text) | Group::TypeReference(text) => text.clone(),
            Group::Token { text, .. } => text.clone(),
            Group::Literal { pieces, .. } => pieces.iter().map(LiteralPiece::text).collect(),
        }
    }

    pub fn colour(&self) -> Colour {
        match self {
            Group::Plain(_) => Colour::None,
            Group::Token { kind, .. } => kind.colour(),
            Group::TypeReference(_) => TokenKind::TypeParameter.colour(),
            Group::Literal { .. } => TokenKind::String.colour(),
        }
    }

    /// CSS class suffix, appended to the configured prefix.
    pub fn css_name(&self) -> String {
        match self {
            Group::Plain(_) => "plain".to_string(),
            Group::Token { kind, .. } => kind.css_name(),
            Group::TypeReference(_) => "type-reference".to_string(),
            Group::Literal {
                kind: LiteralKind::String,
                ..
            } => "string".to_string(),
            Group::Literal {
                kind: LiteralKind::Char,
                ..
            } => "char".to_string(),
        }
    }
}

struct OpenLiteral {
    kind: LiteralKind,
    pieces: Vec<LiteralPiece>,
}

impl OpenLiteral {
    fn push_text(&mut self, text: &str) {
        if let Some(LiteralPiece::Text(last)) = self.pieces.last_mut() {
            last.push_str(text);
        } else {
            self.pieces.push(LiteralPiece::Text(text.to_string()));
        }
    }

    fn closes_on(&self, kind: TokenKind) -> bool {
        matches!(
            (self.kind, kind),
            (LiteralKind::String, TokenKind::CloseString) | (LiteralKind::Char, TokenKind::CloseChar)
        )
    }
}

#[derive(Default)]
struct Folder {
    groups: Vec<Group>,
    plain: String,
    literal: Option<OpenLiteral>,
    type_parameters: HashSet<String>,
}

impl Folder {
    fn push(&mut self, token: &Token) {
        if let Some(mut literal) = self.literal.take() {
            match token.kind {
                TokenKind::Escape => {
                    literal.pieces.push(LiteralPiece::Escape(token.text.clone()));
                    self.literal = Some(literal);
                    return;
                }
                kind if literal.closes_on(kind) => {
                    literal.push_text(&token.text);
                    self.groups.push(Group::Literal {
                        kind: literal.kind,
                        pieces: literal.pieces,
                    });
                    return;
                }
                kind if kind.is_literal_part() => {
                    literal.push_text(&token.text);
                    self.literal = Some(literal);
                    return;
                }
                _ => self.close_literal(literal),
            }
        }

        match token.kind {
            TokenKind::OpenString | TokenKind::OpenChar => {
                self.flush_plain();
                let kind = if token.kind == TokenKind::OpenString {
                    LiteralKind::String
                } else {
                    LiteralKind::Char
                };
                self.literal = Some(OpenLiteral {
                    kind,
                    pieces: vec![LiteralPiece::Text(token.text.clone())],
                });
            }
            TokenKind::TypeParameter => {
                self.type_parameters.insert(token.text.clone());
                self.push_group(Group::Token {
                    kind: token.kind,
                    text: token.text.clone(),
                });
            }
            TokenKind::Type | TokenKind::Name if self.type_parameters.contains(&token.text) => {
                self.push_group(Group::TypeReference(token.text.clone()));
            }
            kind if kind.colour() == Colour::None => self.plain.push_str(&token.text),
            kind => self.push_group(Group::Token {
                kind,
                text: token.text.clone(),
            }),
        }
    }

    fn close_literal(&mut self, literal: OpenLiteral) {
        self.groups.push(Group::Literal {
            kind: literal.kind,
            pieces: literal.pieces,
        });
    }

    fn push_group(&mut self, group: Group) {
        self.flush_plain();
        self.groups.push(group);
    }

    fn flush_plain(&mut self) {
        if !self.plain.is_empty() {
            let text = std::mem::take(&mut self.plain);
            self.groups.push(Group::Plain(text));
        }
    }

    fn finish(mut self) -> Vec<Group> {
        if let Some(literal) = self.literal.take() {
            self.close_literal(literal);
        }
        self.flush_plain();
        self.groups
    }
}

/// Fold tokens into display groups.
pub fn group(tokens: &[Token]) -> Vec<Group> {
    let mut folder = Folder::default();
    for token in tokens {
        folder.push(token);
    }
    let groups = folder.finish();
    log::debug!("folded {} tokens into {} groups", tokens.len(), groups.len());
    groups
}

/// Render tokens as an HTML fragment with the default configuration.
pub fn fold(tokens: &TokenStream) -> String {
    fold_with(tokens, &HighlightConfig::default())
}

/// Render tokens as an HTML fragment, one span per group.
pub fn fold_with(tokens: &TokenStream, config: &HighlightConfig) -> String {
    render_groups(&group(tokens), config)
}

pub fn render_groups(groups: &[Group], config: &HighlightConfig) -> String {
    let mut out = String::new();
    for group in groups {
        match group {
            Group::Literal { pieces, .. } => {
                open_span(&mut out, &group.css_name(), group.colour(), config);
                for piece in pieces {
                    match piece {
                        LiteralPiece::Text(text) => out.push_str(&escape_html(text)),
                        LiteralPiece::Escape(text) => {
                            let kind = TokenKind::Escape;
                            open_span(&mut out, &kind.css_name(), kind.colour(), config);
                            out.push_str(&escape_html(text));
                            out.push_str("</span>");
                        }
                    }
                }
                out.push_str("</span>");
            }
            _ => {
                open_span(&mut out, &group.css_name(), group.colour(), config);
                out.push_str(&escape_html(&group.text()));
                out.push_str("</span>");
            }
        }
    }
    out
}

fn open_span(out: &mut String, name: &str, colour: Colour, config: &HighlightConfig) {
    match config.render.markup {
        Markup::Class => {
            let prefix = escape_html(&config.render.class_prefix);
            out.push_str(&format!("<span class=\"{prefix}{name}\">"));
        }
        Markup::Inline => match config.palette.hex(colour) {
            Some(hex) => out.push_str(&format!("<span style=\"color: {};\">", escape_html(hex))),
            None => out.push_str("<span>"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::lexing::tokenize;
    use crate::highlight::testing::mk_tokens;
    use TokenKind::*;

    #[test]
    fn test_plain_runs_merge() {
        let tokens = mk_tokens(&[(Name, "x"), (Whitespace, " "), (Name, "="), (Whitespace, " ")]);
        assert_eq!(group(&tokens), vec![Group::Plain("x = ".to_string())]);
    }

    #[test]
    fn test_coloured_tokens_stand_alone() {
        let tokens = mk_tokens(&[(Keyword, "let"), (Whitespace, " "), (Keyword, "mut")]);
        assert_eq!(
            group(&tokens),
            vec![
                Group::Token {
                    kind: Keyword,
                    text: "let".to_string()
                },
                Group::Plain(" ".to_string()),
                Group::Token {
                    kind: Keyword,
                    text: "mut".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_literal_with_escape() {
        let tokens = mk_tokens(&[
            (OpenString, "\""),
            (String, "a"),
            (Escape, "\\"),
            (String, "n"),
            (CloseString, "\""),
            (EndStatement, ";"),
        ]);
        let groups = group(&tokens);
        assert_eq!(
            groups[0],
            Group::Literal {
                kind: LiteralKind::String,
                pieces: vec![
                    LiteralPiece::Text("\"a".to_string()),
                    LiteralPiece::Escape("\\".to_string()),
                    LiteralPiece::Text("n\"".to_string()),
                ]
            }
        );
        assert_eq!(groups[0].text(), "\"a\\n\"");
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_unterminated_literal_is_closed() {
        let tokens = mk_tokens(&[(OpenChar, "'"), (Char, "x")]);
        let groups = group(&tokens);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].text(), "'x");
        assert_eq!(groups[0].colour(), Colour::Green);
    }

    #[test]
    fn test_type_parameter_references() {
        let tokens = mk_tokens(&[
            (OpenTypeParameters, "<"),
            (TypeParameter, "T"),
            (CloseTypeParameters, ">"),
            (Type, "T"),
            (Type, "U"),
        ]);
        let groups = group(&tokens);
        assert_eq!(groups[3], Group::TypeReference("T".to_string()));
        assert_eq!(groups[3].colour(), Colour::Cyan);
        assert_eq!(groups[4], Group::Plain("U".to_string()));
    }

    #[test]
    fn test_fold_class_markup() {
        let html = fold(&tokenize("let x;"));
        assert_eq!(
            html,
            "<span class=\"hl-keyword\">let</span><span class=\"hl-plain\"> x</span><span class=\"hl-end-statement\">;</span>"
        );
    }

    #[test]
    fn test_fold_inline_markup() {
        let mut config = HighlightConfig::default();
        config.render.markup = Markup::Inline;
        let html = fold_with(&tokenize("a.b"), &config);
        assert!(html.contains("<span style=\"color: #8250df;\">"), "{html}");
    }

    #[test]
    fn test_fold_escapes_text() {
        let html = fold(&tokenize("a < b && \"<\""));
        assert!(!html.contains("< b"));
        assert!(html.contains("&lt;"));
        assert!(html.contains("&amp;&amp;"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(fold(&tokenize("")), "");
        assert!(group(&[]).is_empty());
    }
}
