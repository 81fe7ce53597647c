//! Transition table
//!
//!     `transition(state, lookaround) -> Action` is the whole dispatch policy of the lexer.
//!     It is a pure function: it reads the top of the state stack, the current character
//!     class, one character of lookahead, the last emitted token and the buffer, and names
//!     the action the lexer applies. It never mutates anything, so every rule can be tested
//!     on its own.
//!
//! Priority
//!
//!     Two rules apply in every non-literal state before the per-state tables, because they
//!     rewrite the token just emitted:
//!     - a second `:` completes a pending colon into a `::` path separator
//!     - a `<` right after `::` opens a turbofish (`::<`) type explanation
//!
//!     The per-state tables follow. Literal states (comment, string, char, escape) treat
//!     everything but their terminator as content. Buffering states (word, chain, type
//!     annotation) decide whether the character extends the buffer or terminates it. A
//!     terminating character is handled with [Action::Finish]: the construct is flushed and
//!     popped, and the same character is dispatched again against the state beneath. The
//!     structural states (neutral, generic list, type explanation) emit punctuation and open
//!     new constructs.

use super::char_classes::CharClass;
use super::state::LexState;
use crate::highlight::heuristics::{is_integer, is_operator_run, is_type_modifier};
use crate::highlight::token::TokenKind;

/// What the lexer sees when it dispatches one character.
#[derive(Debug, Clone, Copy)]
pub struct Lookaround<'a> {
    pub class: CharClass,
    pub ch: char,
    /// The character after `ch`, if any.
    pub next: Option<(CharClass, char)>,
    /// Kind of the last emitted token.
    pub last: Option<TokenKind>,
    /// True at the start of input and after whitespace or a line break.
    pub after_space: bool,
    pub buffer: &'a str,
}

impl Lookaround<'_> {
    fn next_is(&self, class: CharClass) -> bool {
        self.next.is_some_and(|(next, _)| next == class)
    }

    fn next_is_digit(&self) -> bool {
        self.next.is_some_and(|(_, c)| c.is_ascii_digit())
    }

    fn space_kind(&self) -> TokenKind {
        if self.class == CharClass::Newline {
            TokenKind::NewLine
        } else {
            TokenKind::Whitespace
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Append the character to the buffer.
    Buffer,
    /// Push a word accumulation and buffer the character.
    BeginWord,
    /// Emit the character as a single token.
    Emit(TokenKind),
    /// Emit the character as a token and push a state.
    Open(TokenKind, LexState),
    /// Flush buffered content, emit the character as a token and pop.
    Close(TokenKind),
    /// Flush the buffer, pop the state and dispatch the character again.
    Finish,
    /// Flush the buffer, keep the state and dispatch the character again.
    Settle,
    /// Start a line comment with this character.
    OpenComment,
    /// Flush the comment, pop it and emit the line break.
    CloseComment,
    /// Flush literal content, emit an escape and protect the next character.
    Escape,
    /// Take the protected character as literal content.
    TakeEscaped,
    /// The open char literal is a lifetime: re-read it as a word and dispatch again.
    Lifetime,
    /// First colon of a `::`.
    PendingColon,
    /// Second colon of a `::`.
    PathSeparator,
    /// `<` right after `::`.
    OpenTypeExplanation,
    /// `>` completing a buffered `-`.
    Arrow,
    /// `)` outside a buffering state: closes a call or completes a unit.
    CloseParen,
    /// `(` after a buffered word or chain segment.
    Call,
    /// `<` adjacent to a buffered word.
    Generic,
}

/// Decide the action for one character.
pub fn transition(state: Option<LexState>, look: &Lookaround<'_>) -> Action {
    use LexState as S;

    if !state.is_some_and(LexState::is_literal) && look.buffer.is_empty() {
        if look.class == CharClass::Colon
            && look.last == Some(TokenKind::ClassMethodCallOrTypeDeclaration)
        {
            return Action::PathSeparator;
        }
        if look.class == CharClass::Less && look.last == Some(TokenKind::ClassMethodCall) {
            return Action::OpenTypeExplanation;
        }
    }

    match state {
        Some(S::InComment) => match look.class {
            CharClass::Newline => Action::CloseComment,
            _ => Action::Buffer,
        },
        Some(S::InString) => match look.class {
            CharClass::DoubleQuote => Action::Close(TokenKind::CloseString),
            CharClass::Backslash => Action::Escape,
            _ => Action::Buffer,
        },
        Some(S::InChar) => match look.class {
            CharClass::SingleQuote => Action::Close(TokenKind::CloseChar),
            CharClass::Backslash => Action::Escape,
            // `'a` followed by anything but a quote was a lifetime or label
            _ if look.last == Some(TokenKind::OpenChar) && !look.buffer.is_empty() => {
                Action::Lifetime
            }
            _ => Action::Buffer,
        },
        Some(S::InEscape) => Action::TakeEscaped,
        Some(S::InUnknownWordAccumulation) => word(look),
        Some(S::InMethodOrAttributeChain) => chain(look),
        Some(S::InTypeAnnotation) => annotation(look),
        Some(S::InGenericParameterList) | Some(S::InTypeExplanation) | None => {
            structural(state, look)
        }
    }
}

fn word(look: &Lookaround<'_>) -> Action {
    let buffer = look.buffer;
    match look.class {
        CharClass::Word | CharClass::Other => Action::Buffer,
        CharClass::Dot if is_integer(buffer) && look.next_is_digit() => Action::Buffer,
        CharClass::Greater if buffer == "-" => Action::Arrow,
        CharClass::Greater | CharClass::Less | CharClass::Minus if is_operator_run(buffer) => {
            Action::Buffer
        }
        CharClass::Less => Action::Generic,
        CharClass::OpenParen if !is_operator_run(buffer) => Action::Call,
        _ => Action::Finish,
    }
}

fn chain(look: &Lookaround<'_>) -> Action {
    match look.class {
        CharClass::Word => Action::Buffer,
        CharClass::OpenParen => Action::Call,
        CharClass::Dot if look.buffer.is_empty() => Action::Emit(TokenKind::MethodOrAttributeCall),
        CharClass::Dot => Action::Settle,
        _ => Action::Finish,
    }
}

fn annotation(look: &Lookaround<'_>) -> Action {
    let empty = look.buffer.is_empty();
    match look.class {
        CharClass::Word => Action::Buffer,
        CharClass::SingleQuote if empty => Action::Buffer,
        class if class.is_space() && empty => Action::Emit(look.space_kind()),
        class if class.is_space() && is_type_modifier(look.buffer) => Action::Settle,
        CharClass::Colon if look.next_is(CharClass::Colon) => {
            if empty {
                Action::PendingColon
            } else {
                Action::Settle
            }
        }
        CharClass::Ampersand | CharClass::OpenBracket | CharClass::OpenParen | CharClass::Less
            if !empty =>
        {
            Action::Settle
        }
        CharClass::Ampersand => Action::Emit(TokenKind::Reference),
        CharClass::OpenBracket => Action::Emit(TokenKind::OpenBracket),
        CharClass::OpenParen => Action::Emit(TokenKind::OpenFunctionCall),
        CharClass::Less => Action::Open(
            TokenKind::OpenTypeParameters,
            LexState::InGenericParameterList,
        ),
        _ => Action::Finish,
    }
}

fn structural(state: Option<LexState>, look: &Lookaround<'_>) -> Action {
    use LexState as S;

    match look.class {
        CharClass::Slash if look.after_space && look.next_is(CharClass::Slash) => {
            Action::OpenComment
        }
        class if class.is_space() => Action::Emit(look.space_kind()),
        CharClass::OpenParen => Action::Emit(TokenKind::OpenFunctionCall),
        CharClass::CloseParen => Action::CloseParen,
        CharClass::OpenBrace => Action::Emit(TokenKind::OpenScope),
        CharClass::CloseBrace => Action::Emit(TokenKind::CloseScope),
        CharClass::OpenBracket => Action::Emit(TokenKind::OpenBracket),
        CharClass::CloseBracket => Action::Emit(TokenKind::CloseBracket),
        CharClass::Semicolon => Action::Emit(TokenKind::EndStatement),
        CharClass::Comma => Action::Emit(TokenKind::Comma),
        CharClass::Ampersand => Action::Emit(TokenKind::Reference),
        CharClass::Backslash => Action::Emit(TokenKind::Escape),
        CharClass::DoubleQuote => Action::Open(TokenKind::OpenString, S::InString),
        // Inside `<...>` a quote starts a lifetime parameter
        CharClass::SingleQuote if state.is_none() => Action::Open(TokenKind::OpenChar, S::InChar),
        CharClass::Dot => Action::Open(
            TokenKind::MethodOrAttributeCall,
            S::InMethodOrAttributeChain,
        ),
        CharClass::Colon if look.next_is(CharClass::Colon) => Action::PendingColon,
        CharClass::Colon => Action::Open(TokenKind::OpenTypeDeclaration, S::InTypeAnnotation),
        // `a < b` is a comparison, `Vec<T` and `)<` are not
        CharClass::Less if state.is_none() && look.after_space => Action::BeginWord,
        CharClass::Less => Action::Open(TokenKind::OpenTypeParameters, S::InGenericParameterList),
        CharClass::Greater if state == Some(S::InGenericParameterList) => {
            Action::Close(TokenKind::CloseTypeParameters)
        }
        CharClass::Greater if state == Some(S::InTypeExplanation) => {
            Action::Close(TokenKind::CloseTypeExplanation)
        }
        _ => Action::BeginWord,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn look<'a>(ch: char, buffer: &'a str, last: Option<TokenKind>) -> Lookaround<'a> {
        let class = crate::highlight::lexing::char_classes::classify(&ch.to_string())[0].0;
        Lookaround {
            class,
            ch,
            next: None,
            last,
            after_space: last.map_or(true, TokenKind::is_space),
            buffer,
        }
    }

    fn with_next(mut look: Lookaround<'_>, next: char) -> Lookaround<'_> {
        let class = crate::highlight::lexing::char_classes::classify(&next.to_string())[0].0;
        look.next = Some((class, next));
        look
    }

    #[test]
    fn test_second_colon_completes_path() {
        let action = transition(
            None,
            &look(':', "", Some(TokenKind::ClassMethodCallOrTypeDeclaration)),
        );
        assert_eq!(action, Action::PathSeparator);
    }

    #[test]
    fn test_less_after_path_opens_explanation() {
        let action = transition(None, &look('<', "", Some(TokenKind::ClassMethodCall)));
        assert_eq!(action, Action::OpenTypeExplanation);
    }

    #[test]
    fn test_string_content_is_opaque() {
        let action = transition(Some(LexState::InString), &look(':', "a", None));
        assert_eq!(action, Action::Buffer);
        let action = transition(Some(LexState::InString), &look('"', "a", None));
        assert_eq!(action, Action::Close(TokenKind::CloseString));
        let action = transition(Some(LexState::InString), &look('\\', "a", None));
        assert_eq!(action, Action::Escape);
    }

    #[test]
    fn test_char_turns_into_lifetime() {
        let state = Some(LexState::InChar);
        assert_eq!(
            transition(state, &look('a', "", Some(TokenKind::OpenChar))),
            Action::Buffer
        );
        assert_eq!(
            transition(state, &look(' ', "a", Some(TokenKind::OpenChar))),
            Action::Lifetime
        );
        assert_eq!(
            transition(state, &look('\'', "a", Some(TokenKind::OpenChar))),
            Action::Close(TokenKind::CloseChar)
        );
        // After an escape the literal is a char, never a lifetime
        assert_eq!(
            transition(state, &look('x', "n", Some(TokenKind::Escape))),
            Action::Buffer
        );
    }

    #[test]
    fn test_word_rules() {
        let state = Some(LexState::InUnknownWordAccumulation);
        assert_eq!(transition(state, &look('x', "a", None)), Action::Buffer);
        assert_eq!(transition(state, &look(' ', "a", None)), Action::Finish);
        assert_eq!(transition(state, &look('(', "foo", None)), Action::Call);
        assert_eq!(transition(state, &look('(', "=", None)), Action::Finish);
        assert_eq!(transition(state, &look('<', "Vec", None)), Action::Generic);
        assert_eq!(transition(state, &look('>', "-", None)), Action::Arrow);
        assert_eq!(transition(state, &look('>', "=", None)), Action::Buffer);
        assert_eq!(transition(state, &look('>', "T", None)), Action::Finish);
    }

    #[test]
    fn test_dot_continues_integer_only_before_digit() {
        let state = Some(LexState::InUnknownWordAccumulation);
        assert_eq!(
            transition(state, &with_next(look('.', "1", None), '5')),
            Action::Buffer
        );
        assert_eq!(
            transition(state, &with_next(look('.', "1", None), '.')),
            Action::Finish
        );
        assert_eq!(
            transition(state, &with_next(look('.', "x", None), '5')),
            Action::Finish
        );
    }

    #[test]
    fn test_chain_rules() {
        let state = Some(LexState::InMethodOrAttributeChain);
        assert_eq!(transition(state, &look('a', "", None)), Action::Buffer);
        assert_eq!(transition(state, &look('(', "len", None)), Action::Call);
        assert_eq!(transition(state, &look('.', "a", None)), Action::Settle);
        assert_eq!(
            transition(state, &look('.', "", None)),
            Action::Emit(TokenKind::MethodOrAttributeCall)
        );
        assert_eq!(transition(state, &look(';', "a", None)), Action::Finish);
    }

    #[test]
    fn test_annotation_rules() {
        let state = Some(LexState::InTypeAnnotation);
        let opened = Some(TokenKind::OpenTypeDeclaration);
        assert_eq!(
            transition(state, &look(' ', "", opened)),
            Action::Emit(TokenKind::Whitespace)
        );
        assert_eq!(transition(state, &look(' ', "u32", None)), Action::Finish);
        assert_eq!(transition(state, &look(' ', "mut", None)), Action::Settle);
        assert_eq!(
            transition(state, &look('\n', "", opened)),
            Action::Emit(TokenKind::NewLine)
        );
        assert_eq!(transition(state, &look(' ', "'a", None)), Action::Settle);
        assert_eq!(transition(state, &look('<', "Vec", None)), Action::Settle);
        assert_eq!(
            transition(state, &look('<', "", None)),
            Action::Open(
                TokenKind::OpenTypeParameters,
                LexState::InGenericParameterList
            )
        );
        assert_eq!(
            transition(state, &look('&', "", None)),
            Action::Emit(TokenKind::Reference)
        );
        assert_eq!(
            transition(state, &with_next(look(':', "std", None), ':')),
            Action::Settle
        );
        assert_eq!(
            transition(state, &with_next(look(':', "", None), ':')),
            Action::PendingColon
        );
        assert_eq!(transition(state, &look(',', "T", None)), Action::Finish);
        assert_eq!(transition(state, &look(')', "", None)), Action::Finish);
    }

    #[test]
    fn test_structural_rules() {
        let space = Some(TokenKind::Whitespace);
        assert_eq!(
            transition(None, &with_next(look('/', "", space), '/')),
            Action::OpenComment
        );
        assert_eq!(
            transition(None, &with_next(look('/', "", Some(TokenKind::Name)), '/')),
            Action::BeginWord
        );
        assert_eq!(
            transition(None, &with_next(look('/', "", space), ' ')),
            Action::BeginWord
        );
        assert_eq!(transition(None, &look('<', "", space)), Action::BeginWord);
        assert_eq!(
            transition(None, &look('<', "", Some(TokenKind::CloseFunctionCall))),
            Action::Open(
                TokenKind::OpenTypeParameters,
                LexState::InGenericParameterList
            )
        );
        assert_eq!(transition(None, &look('>', "", space)), Action::BeginWord);
        assert_eq!(
            transition(Some(LexState::InGenericParameterList), &look('>', "", None)),
            Action::Close(TokenKind::CloseTypeParameters)
        );
        assert_eq!(
            transition(Some(LexState::InTypeExplanation), &look('>', "", None)),
            Action::Close(TokenKind::CloseTypeExplanation)
        );
        assert_eq!(
            transition(Some(LexState::InGenericParameterList), &look('\'', "", None)),
            Action::BeginWord
        );
        assert_eq!(
            transition(None, &look('\'', "", space)),
            Action::Open(TokenKind::OpenChar, LexState::InChar)
        );
        assert_eq!(
            transition(None, &look('\\', "", space)),
            Action::Emit(TokenKind::Escape)
        );
        assert_eq!(transition(None, &look(')', "", None)), Action::CloseParen);
        assert_eq!(
            transition(None, &look(' ', "", None)),
            Action::Emit(TokenKind::Whitespace)
        );
        assert_eq!(
            transition(None, &look('\n', "", None)),
            Action::Emit(TokenKind::NewLine)
        );
    }

    #[test]
    fn test_comment_runs_to_line_end() {
        let state = Some(LexState::InComment);
        assert_eq!(transition(state, &look('"', "//", None)), Action::Buffer);
        assert_eq!(transition(state, &look('\n', "//", None)), Action::CloseComment);
    }
}
