//! Token types shared by the lexer, the fold pass and the output formats.
//!
//!     A token is an immutable `(kind, text)` pair. The lexer guarantees that the texts of a
//!     stream, concatenated in order, reproduce the source exactly, so every character of the
//!     input lives in exactly one token.
//!
//! Kinds
//!
//!     The kinds fall into a few families:
//!
//!     Punctuation:
//!         Whitespace, NewLine, Comma, EndStatement, Reference, Arrow and the open/close pairs
//!         for calls, units, scopes, brackets and generic lists.
//!
//!     Literals:
//!         OpenString/String/CloseString, OpenChar/Char/CloseChar and Escape. The fold pass
//!         merges a whole literal run into one group.
//!
//!     Names:
//!         Name, Keyword, Type, TypeParameter, Lifetime, Attribute, MethodCall, MacroCall and
//!         StructConstruction.
//!
//!     Structural markers:
//!         MethodOrAttributeCall (`.`), the pending colon, ClassMethodCall (`::`) and the
//!         turbofish pair OpenTypeExplanation (`::<`) / CloseTypeExplanation.
//!
//!     The display colour of a kind is a pure function, see [TokenKind::colour].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Whitespace,
    NewLine,
    Comma,
    OpenTypeParameters,
    CloseTypeParameters,
    OpenFunctionCall,
    CloseFunctionCall,
    OpenUnit,
    CloseUnit,
    OpenScope,
    CloseScope,
    OpenBracket,
    CloseBracket,
    /// The `.` that starts a member access.
    MethodOrAttributeCall,
    Attribute,
    MethodCall,
    /// A call whose name looks like a tuple struct or enum variant, e.g. `Some(`.
    StructConstruction,
    MacroCall,
    /// First `:` of a `::`, replaced as soon as the second colon arrives.
    ClassMethodCallOrTypeDeclaration,
    ClassMethodCall,
    OpenTypeExplanation,
    CloseTypeExplanation,
    OpenTypeDeclaration,
    Type,
    EndStatement,
    Reference,
    Arrow,
    OpenString,
    String,
    CloseString,
    OpenChar,
    Char,
    CloseChar,
    Escape,
    TypeParameter,
    Lifetime,
    Comment,
    Name,
    Keyword,
}

/// Display colours. `None` marks low-salience tokens that get merged into plain runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Colour {
    None,
    Orange,
    Green,
    Cyan,
    Purple,
    Yellow,
    Blue,
    Grey,
}

impl TokenKind {
    /// Display colour of this kind.
    pub const fn colour(self) -> Colour {
        match self {
            TokenKind::Keyword | TokenKind::EndStatement | TokenKind::Escape => Colour::Orange,
            TokenKind::OpenString
            | TokenKind::String
            | TokenKind::CloseString
            | TokenKind::OpenChar
            | TokenKind::Char
            | TokenKind::CloseChar => Colour::Green,
            TokenKind::TypeParameter | TokenKind::Lifetime => Colour::Cyan,
            TokenKind::Attribute => Colour::Purple,
            TokenKind::MethodCall | TokenKind::MacroCall => Colour::Yellow,
            TokenKind::StructConstruction => Colour::Blue,
            TokenKind::Comment => Colour::Grey,
            _ => Colour::None,
        }
    }

    /// The SCREAMING_SNAKE_CASE name, as used by the token dump formats.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::NewLine => "NEW_LINE",
            TokenKind::Comma => "COMMA",
            TokenKind::OpenTypeParameters => "OPEN_TYPE_PARAMETERS",
            TokenKind::CloseTypeParameters => "CLOSE_TYPE_PARAMETERS",
            TokenKind::OpenFunctionCall => "OPEN_FUNCTION_CALL",
            TokenKind::CloseFunctionCall => "CLOSE_FUNCTION_CALL",
            TokenKind::OpenUnit => "OPEN_UNIT",
            TokenKind::CloseUnit => "CLOSE_UNIT",
            TokenKind::OpenScope => "OPEN_SCOPE",
            TokenKind::CloseScope => "CLOSE_SCOPE",
            TokenKind::OpenBracket => "OPEN_BRACKET",
            TokenKind::CloseBracket => "CLOSE_BRACKET",
            TokenKind::MethodOrAttributeCall => "METHOD_OR_ATTRIBUTE_CALL",
            TokenKind::Attribute => "ATTRIBUTE",
            TokenKind::MethodCall => "METHOD_CALL",
            TokenKind::StructConstruction => "STRUCT_CONSTRUCTION",
            TokenKind::MacroCall => "MACRO_CALL",
            TokenKind::ClassMethodCallOrTypeDeclaration => "CLASS_METHOD_CALL_OR_TYPE_DECLARATION",
            TokenKind::ClassMethodCall => "CLASS_METHOD_CALL",
            TokenKind::OpenTypeExplanation => "OPEN_TYPE_EXPLANATION",
            TokenKind::CloseTypeExplanation => "CLOSE_TYPE_EXPLANATION",
            TokenKind::OpenTypeDeclaration => "OPEN_TYPE_DECLARATION",
            TokenKind::Type => "TYPE",
            TokenKind::EndStatement => "END_STATEMENT",
            TokenKind::Reference => "REFERENCE",
            TokenKind::Arrow => "ARROW",
            TokenKind::OpenString => "OPEN_STRING",
            TokenKind::String => "STRING",
            TokenKind::CloseString => "CLOSE_STRING",
            TokenKind::OpenChar => "OPEN_CHAR",
            TokenKind::Char => "CHAR",
            TokenKind::CloseChar => "CLOSE_CHAR",
            TokenKind::Escape => "ESCAPE",
            TokenKind::TypeParameter => "TYPE_PARAMETER",
            TokenKind::Lifetime => "LIFETIME",
            TokenKind::Comment => "COMMENT",
            TokenKind::Name => "NAME",
            TokenKind::Keyword => "KEYWORD",
        }
    }

    /// kebab-case name used for CSS classes (`OPEN_UNIT` -> `open-unit`).
    pub fn css_name(self) -> String {
        self.name().to_ascii_lowercase().replace('_', "-")
    }

    /// Check if this token is whitespace or a line break
    pub fn is_space(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::NewLine)
    }

    /// Check if this token is part of a string or char literal run
    pub fn is_literal_part(self) -> bool {
        matches!(
            self,
            TokenKind::OpenString
                | TokenKind::String
                | TokenKind::CloseString
                | TokenKind::OpenChar
                | TokenKind::Char
                | TokenKind::CloseChar
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified run of source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.text)
    }
}

/// Ordered lexer output for one code block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenStream(Vec<Token>);

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream(tokens)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.0
    }

    /// Token kinds in stream order.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.0.iter().map(|t| t.kind).collect()
    }

    /// Concatenated token texts. Equals the tokenized source.
    pub fn source(&self) -> String {
        self.0.iter().map(|t| t.text.as_str()).collect()
    }
}

impl Deref for TokenStream {
    type Target = [Token];

    fn deref(&self) -> &[Token] {
        &self.0
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        TokenStream(tokens)
    }
}
