//! Streaming events for a chat reply.
//!
//! The chat stream endpoint pushes plain text frames. Every frame is a token
//! to append, except the literal [`DONE_SENTINEL`] which ends the stream.
//! The protocol has no error frame; failures come from the transport.

/// Frame payload that marks successful completion of a stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// An event in a streaming chat reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A text fragment to append to the reply.
    Token(String),
    /// The backend sent the completion sentinel.
    Done,
    /// The transport failed (connection drop, malformed frame, timeout).
    Error(String),
}

impl StreamEvent {
    /// Interpret one frame payload from the wire.
    pub fn from_frame(data: impl Into<String>) -> Self {
        let data = data.into();
        if data == DONE_SENTINEL {
            StreamEvent::Done
        } else {
            StreamEvent::Token(data)
        }
    }

    /// Returns the token text if this is a `Token` event.
    pub fn token(&self) -> Option<&str> {
        match self {
            StreamEvent::Token(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this event ends the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Done | StreamEvent::Error(_))
    }
}

/// Identifies one transport subscription within a controller.
///
/// Ids are handed out in increasing order and never reused, so an event
/// tagged with an old id can be recognized as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn first() -> Self {
        Self(1)
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}
