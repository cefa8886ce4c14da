//! Chat turn entities

use serde::{Deserialize, Serialize};

/// Role of a turn in a conversation
///
/// `Streaming` only exists while a reply is being received. It is never
/// sent to the backend; see [`Turn::to_wire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Streaming,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Streaming => "streaming",
        }
    }

    /// Role as seen by the backend.
    pub fn to_wire(self) -> WireRole {
        match self {
            Role::User => WireRole::User,
            Role::Assistant | Role::Streaming => WireRole::Assistant,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message in the conversation (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub(crate) fn streaming() -> Self {
        Self {
            role: Role::Streaming,
            content: String::new(),
        }
    }

    pub fn is_streaming(&self) -> bool {
        self.role == Role::Streaming
    }

    pub fn to_wire(&self) -> WireTurn {
        WireTurn {
            role: self.role.to_wire(),
            content: self.content.clone(),
        }
    }
}

/// Role values accepted by the chat stream endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireRole {
    User,
    Assistant,
}

/// A history entry as transmitted to the backend (`{role, content}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireTurn {
    pub role: WireRole,
    pub content: String,
}
