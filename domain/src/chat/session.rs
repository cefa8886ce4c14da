//! Chat session state.
//!
//! [`ChatSession`] keeps finalized turns in order and the in-progress
//! streaming turn in its own slot. The streaming turn is therefore always
//! the last turn and there is never more than one of it.

use super::turn::{Role, Turn, WireTurn};
use thiserror::Error;

/// Precondition violations on [`ChatSession`] operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Turn content cannot be empty")]
    EmptyTurn,

    #[error("A streaming turn is already in progress")]
    AlreadyStreaming,

    #[error("No streaming turn in progress")]
    NotStreaming,

    #[error("Cannot finalize a turn as {0}")]
    InvalidFinalRole(Role),
}

/// Ordered conversation state for one open chat surface
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    turns: Vec<Turn>,
    streaming: Option<Turn>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session pre-filled with finalized turns.
    ///
    /// Streaming turns in `seed` are finalized as assistant turns.
    pub fn seeded(seed: impl IntoIterator<Item = Turn>) -> Self {
        let turns = seed
            .into_iter()
            .map(|mut turn| {
                if turn.is_streaming() {
                    turn.role = Role::Assistant;
                }
                turn
            })
            .collect();
        Self {
            turns,
            streaming: None,
        }
    }

    /// All turns in order, including the streaming turn if any.
    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter().chain(self.streaming.iter())
    }

    pub fn len(&self) -> usize {
        self.turns.len() + usize::from(self.streaming.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last(&self) -> Option<&Turn> {
        self.streaming.as_ref().or_else(|| self.turns.last())
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming.is_some()
    }

    /// Content accumulated so far by the streaming turn.
    pub fn streaming_content(&self) -> Option<&str> {
        self.streaming.as_ref().map(|t| t.content.as_str())
    }

    /// History in wire form, with `streaming` mapped to `assistant`.
    pub fn history(&self) -> Vec<WireTurn> {
        self.turns().map(Turn::to_wire).collect()
    }

    /// Append a user turn. Does not start streaming.
    pub fn append_user_turn(&mut self, text: &str) -> Result<&Turn, SessionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyTurn);
        }
        if self.streaming.is_some() {
            return Err(SessionError::AlreadyStreaming);
        }
        self.turns.push(Turn::user(text));
        Ok(&self.turns[self.turns.len() - 1])
    }

    pub fn begin_streaming_turn(&mut self) -> Result<(), SessionError> {
        if self.streaming.is_some() {
            return Err(SessionError::AlreadyStreaming);
        }
        self.streaming = Some(Turn::streaming());
        Ok(())
    }

    /// Append a token to the streaming turn.
    ///
    /// Returns `false` and leaves the session untouched when nothing is
    /// streaming, so late callbacks after a cancel are harmless.
    pub fn append_token(&mut self, text: &str) -> bool {
        match self.streaming.as_mut() {
            Some(turn) => {
                turn.content.push_str(text);
                true
            }
            None => false,
        }
    }

    /// Finalize the streaming turn as an assistant turn.
    pub fn finalize_streaming_turn(&mut self) -> Result<&Turn, SessionError> {
        self.finalize_streaming_turn_as(Role::Assistant)
    }

    pub fn finalize_streaming_turn_as(&mut self, final_role: Role) -> Result<&Turn, SessionError> {
        if final_role == Role::Streaming {
            return Err(SessionError::InvalidFinalRole(final_role));
        }
        let mut turn = self.streaming.take().ok_or(SessionError::NotStreaming)?;
        turn.role = final_role;
        self.turns.push(turn);
        Ok(&self.turns[self.turns.len() - 1])
    }

    /// Finalize as assistant, substituting `fallback` if nothing was received.
    pub fn finalize_streaming_turn_or(&mut self, fallback: &str) -> Result<&Turn, SessionError> {
        let turn = self.streaming.as_mut().ok_or(SessionError::NotStreaming)?;
        if turn.content.is_empty() {
            turn.content.push_str(fallback);
        }
        self.finalize_streaming_turn()
    }

    /// Drop the streaming turn and its partial content.
    pub fn discard_streaming_turn(&mut self) -> Option<Turn> {
        self.streaming.take()
    }

    pub fn reset(&mut self) {
        self.turns.clear();
        self.streaming = None;
    }
}
