//! Chat behavior: texts the assistant falls back to.
//!
//! [`ChatBehavior`] groups the strings the use cases show when the service
//! cannot answer. Raw transport errors are never shown to the user; one of
//! these messages is shown instead.

use serde::{Deserialize, Serialize};

pub const DEFAULT_STREAM_FALLBACK: &str =
    "Maaf, terjadi kesalahan dalam memproses permintaan Anda.";
pub const DEFAULT_RECIPE_PROMPT: &str = "Tolong berikan resep untuk masakan ini.";
pub const DEFAULT_RECIPE_FALLBACK: &str = "Gagal mendapatkan resep.";
pub const DEFAULT_DESCRIPTION_FALLBACK: &str = "Gagal mendapatkan deskripsi makanan.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatBehavior {
    /// Reply content when a stream fails before any token arrived.
    pub stream_fallback: String,
    /// User turn that opens a recipe conversation.
    pub recipe_prompt: String,
    /// Reply content when the recipe cannot be fetched.
    pub recipe_fallback: String,
    /// Shown when a food description cannot be fetched.
    pub description_fallback: String,
}

impl Default for ChatBehavior {
    fn default() -> Self {
        Self {
            stream_fallback: DEFAULT_STREAM_FALLBACK.to_string(),
            recipe_prompt: DEFAULT_RECIPE_PROMPT.to_string(),
            recipe_fallback: DEFAULT_RECIPE_FALLBACK.to_string(),
            description_fallback: DEFAULT_DESCRIPTION_FALLBACK.to_string(),
        }
    }
}

impl ChatBehavior {
    // ==================== Builder Methods ====================

    pub fn with_stream_fallback(mut self, text: impl Into<String>) -> Self {
        self.stream_fallback = text.into();
        self
    }

    pub fn with_recipe_prompt(mut self, text: impl Into<String>) -> Self {
        self.recipe_prompt = text.into();
        self
    }

    pub fn with_recipe_fallback(mut self, text: impl Into<String>) -> Self {
        self.recipe_fallback = text.into();
        self
    }

    pub fn with_description_fallback(mut self, text: impl Into<String>) -> Self {
        self.description_fallback = text.into();
        self
    }
}
