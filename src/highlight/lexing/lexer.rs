//! The lexer: applies transition-table actions to the token history, state stack and buffer.

use super::char_classes::{classify, CharClass};
use super::state::{LexState, StateStack};
use super::transitions::{transition, Action, Lookaround};
use crate::highlight::heuristics::{
    is_lifetime, is_macro_name, is_operator_run, looks_like_construction,
};
use crate::highlight::keywords::is_keyword;
use crate::highlight::token::{Token, TokenKind, TokenStream};

/// Whether the current character is done or must be dispatched again.
enum Step {
    Consumed,
    Redispatch,
}

/// Single-pass tokenizer for one code block.
#[derive(Debug, Default)]
pub struct Lexer {
    tokens: Vec<Token>,
    stack: StateStack,
    buffer: String,
}

impl Lexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize a whole block. Never fails: unterminated constructs are flushed as tokens of
    /// their own kind.
    pub fn tokenize(mut self, source: &str) -> TokenStream {
        let classes = classify(source);
        for (index, &(class, ch)) in classes.iter().enumerate() {
            let next = classes.get(index + 1).copied();
            self.feed(class, ch, next);
        }
        let stream = self.finish();
        log::debug!(
            "tokenized {} chars into {} tokens",
            classes.len(),
            stream.len()
        );
        stream
    }

    /// Buffer/stack invariant: a non-empty buffer belongs to a buffering state on top.
    pub fn is_consistent(&self) -> bool {
        self.buffer.is_empty() || self.stack.top().is_some_and(LexState::buffers)
    }

    fn feed(&mut self, class: CharClass, ch: char, next: Option<(CharClass, char)>) {
        loop {
            let action = {
                let look = Lookaround {
                    class,
                    ch,
                    next,
                    last: self.last_kind(),
                    after_space: self.after_space(),
                    buffer: &self.buffer,
                };
                transition(self.stack.top(), &look)
            };
            log::trace!("{:?} {:?} -> {:?}", self.stack.top(), ch, action);

            let step = self.apply(action, class, ch);
            debug_assert!(
                self.is_consistent(),
                "buffer {:?} under {:?}",
                self.buffer,
                self.stack.top()
            );
            match step {
                Step::Consumed => break,
                Step::Redispatch => continue,
            }
        }
    }

    fn apply(&mut self, action: Action, class: CharClass, ch: char) -> Step {
        match action {
            Action::Buffer => self.buffer.push(ch),
            Action::BeginWord => {
                self.stack.push(LexState::InUnknownWordAccumulation);
                self.buffer.push(ch);
            }
            Action::Emit(kind) => self.emit(kind, ch),
            Action::Open(kind, state) => {
                self.emit(kind, ch);
                self.stack.push(state);
            }
            Action::Close(kind) => {
                self.flush(Some(class));
                self.emit(kind, ch);
                self.stack.pop();
            }
            Action::Finish => {
                self.flush(Some(class));
                self.stack.pop();
                return Step::Redispatch;
            }
            Action::Settle => {
                self.flush(Some(class));
                return Step::Redispatch;
            }
            Action::OpenComment => {
                self.stack.push(LexState::InComment);
                self.buffer.push(ch);
            }
            Action::CloseComment => {
                self.flush(Some(class));
                self.stack.pop();
                self.emit(TokenKind::NewLine, ch);
            }
            Action::Escape => {
                self.flush(Some(class));
                self.emit(TokenKind::Escape, ch);
                self.stack.push(LexState::InEscape);
            }
            Action::TakeEscaped => {
                self.stack.pop();
                self.buffer.push(ch);
            }
            Action::Lifetime => {
                if let Some(quote) = self.tokens.pop() {
                    self.buffer.insert_str(0, &quote.text);
                }
                self.stack.replace_top(LexState::InUnknownWordAccumulation);
                return Step::Redispatch;
            }
            Action::PendingColon => self.emit(TokenKind::ClassMethodCallOrTypeDeclaration, ch),
            Action::PathSeparator => self.extend_last(TokenKind::ClassMethodCall, ch),
            Action::OpenTypeExplanation => {
                self.extend_last(TokenKind::OpenTypeExplanation, ch);
                self.stack.push(LexState::InTypeExplanation);
            }
            Action::Arrow => {
                let mut text = std::mem::take(&mut self.buffer);
                text.push(ch);
                self.stack.pop();
                self.tokens.push(Token::new(TokenKind::Arrow, text));
            }
            Action::CloseParen => self.close_paren(ch),
            Action::Call => {
                let word = std::mem::take(&mut self.buffer);
                if !word.is_empty() {
                    let kind = call_kind(&word);
                    self.tokens.push(Token::new(kind, word));
                }
                self.stack.pop();
                self.emit(TokenKind::OpenFunctionCall, ch);
            }
            Action::Generic => {
                let word = std::mem::take(&mut self.buffer);
                let kind = self.generic_owner_kind(&word);
                self.tokens.push(Token::new(kind, word));
                self.stack.pop();
                self.emit(TokenKind::OpenTypeParameters, ch);
                self.stack.push(LexState::InGenericParameterList);
            }
        }
        Step::Consumed
    }

    /// Close every open construct at end of input, flushing what was buffered.
    fn finish(mut self) -> TokenStream {
        while !self.stack.is_empty() {
            self.flush(None);
            self.stack.pop();
        }
        TokenStream::new(self.tokens)
    }

    fn emit(&mut self, kind: TokenKind, ch: char) {
        self.tokens.push(Token::new(kind, ch));
    }

    /// Replace the last token with `kind`, appending `ch` to its text.
    fn extend_last(&mut self, kind: TokenKind, ch: char) {
        match self.tokens.pop() {
            Some(last) => {
                let mut text = last.text;
                text.push(ch);
                self.tokens.push(Token::new(kind, text));
            }
            None => self.emit(kind, ch),
        }
    }

    /// `(` right after whitespace followed by `)` is the unit value, not a call.
    fn close_paren(&mut self, ch: char) {
        let opens_unit = self.last_kind() == Some(TokenKind::OpenFunctionCall)
            && self.second_last_kind().map_or(true, TokenKind::is_space);
        if opens_unit {
            if let Some(open) = self.tokens.pop() {
                self.tokens.push(Token::new(TokenKind::OpenUnit, open.text));
            }
            self.emit(TokenKind::CloseUnit, ch);
        } else {
            self.emit(TokenKind::CloseFunctionCall, ch);
        }
    }

    fn flush(&mut self, terminator: Option<CharClass>) {
        if self.buffer.is_empty() {
            return;
        }
        let kind = self.flush_kind(terminator);
        let text = std::mem::take(&mut self.buffer);
        self.tokens.push(Token::new(kind, text));
    }

    fn flush_kind(&self, terminator: Option<CharClass>) -> TokenKind {
        let word = self.buffer.as_str();
        match self.stack.top() {
            Some(LexState::InComment) => TokenKind::Comment,
            Some(LexState::InString) => TokenKind::String,
            Some(LexState::InChar) => TokenKind::Char,
            Some(LexState::InMethodOrAttributeChain) => {
                if is_keyword(word) {
                    TokenKind::Keyword
                } else if terminator == Some(CharClass::Colon) {
                    // `.collect::<...>()`
                    TokenKind::MethodCall
                } else {
                    TokenKind::Attribute
                }
            }
            Some(LexState::InTypeAnnotation) => {
                if is_lifetime(word) {
                    TokenKind::Lifetime
                } else if is_keyword(word) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Type
                }
            }
            _ => classify_word(word, self.stack.beneath()),
        }
    }

    /// The word before a generic list: `impl<`, `fn name<`, or a plain name.
    fn generic_owner_kind(&self, word: &str) -> TokenKind {
        if !is_keyword(word) && self.last_significant_is_keyword("fn") {
            TokenKind::MethodCall
        } else {
            classify_word(word, self.stack.beneath())
        }
    }

    fn last_significant_is_keyword(&self, keyword: &str) -> bool {
        self.tokens
            .iter()
            .rev()
            .find(|t| !t.kind.is_space())
            .is_some_and(|t| t.kind == TokenKind::Keyword && t.text == keyword)
    }

    fn last_kind(&self) -> Option<TokenKind> {
        self.tokens.last().map(|t| t.kind)
    }

    fn second_last_kind(&self) -> Option<TokenKind> {
        self.tokens.iter().rev().nth(1).map(|t| t.kind)
    }

    fn after_space(&self) -> bool {
        self.last_kind().map_or(true, TokenKind::is_space)
    }
}

/// Classify a finished word given the state it was accumulated in.
fn classify_word(word: &str, context: Option<LexState>) -> TokenKind {
    if is_lifetime(word) {
        TokenKind::Lifetime
    } else if is_operator_run(word) {
        TokenKind::Name
    } else if is_keyword(word) {
        TokenKind::Keyword
    } else {
        match context {
            Some(LexState::InGenericParameterList) => TokenKind::TypeParameter,
            Some(LexState::InTypeExplanation) => TokenKind::Type,
            _ => TokenKind::Name,
        }
    }
}

/// The name in front of `(`.
fn call_kind(word: &str) -> TokenKind {
    if is_keyword(word) {
        TokenKind::Keyword
    } else if is_macro_name(word) {
        TokenKind::MacroCall
    } else if looks_like_construction(word) {
        TokenKind::StructConstruction
    } else {
        TokenKind::MethodCall
    }
}

/// Tokenize a block of source text.
pub fn tokenize(source: &str) -> TokenStream {
    Lexer::new().tokenize(source)
}
