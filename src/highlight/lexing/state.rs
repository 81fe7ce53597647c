//! Lexer state stack
//!
//!     Each entry names a multi-character construct that is currently open. The top of the
//!     stack is the active mode; an empty stack is neutral scanning. Only some states own the
//!     accumulation buffer (see [LexState::buffers]): the lexer keeps the buffer empty whenever
//!     the top state is not one of them.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LexState {
    /// `// ...` up to the end of the line
    InComment,
    InString,
    InChar,
    /// The character after a `\` inside a string or char literal
    InEscape,
    /// A name, keyword, number or operator run
    InUnknownWordAccumulation,
    /// The segment after a `.`
    InMethodOrAttributeChain,
    /// The type after a single `:`
    InTypeAnnotation,
    /// Inside `<...>`
    InGenericParameterList,
    /// Inside `::<...>`
    InTypeExplanation,
}

impl LexState {
    /// States whose characters are opaque content (no structural dispatch).
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            LexState::InComment | LexState::InString | LexState::InChar | LexState::InEscape
        )
    }

    /// States that accumulate characters in the buffer.
    pub fn buffers(self) -> bool {
        matches!(
            self,
            LexState::InComment
                | LexState::InString
                | LexState::InChar
                | LexState::InUnknownWordAccumulation
                | LexState::InMethodOrAttributeChain
                | LexState::InTypeAnnotation
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateStack {
    states: Vec<LexState>,
}

impl StateStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, state: LexState) {
        log::trace!("push {:?} (depth {})", state, self.states.len() + 1);
        self.states.push(state);
    }

    pub fn pop(&mut self) -> Option<LexState> {
        let popped = self.states.pop();
        log::trace!("pop {:?} (depth {})", popped, self.states.len());
        popped
    }

    pub fn top(&self) -> Option<LexState> {
        self.states.last().copied()
    }

    /// The state directly under the top.
    pub fn beneath(&self) -> Option<LexState> {
        self.states.iter().rev().nth(1).copied()
    }

    /// Swap the top state in place, keeping the depth.
    pub fn replace_top(&mut self, state: LexState) {
        if let Some(top) = self.states.last_mut() {
            log::trace!("replace {:?} with {:?}", top, state);
            *top = state;
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
