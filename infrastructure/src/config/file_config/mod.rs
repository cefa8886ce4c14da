//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types where
//! appropriate.

mod api;
mod catalog;
mod chat;
mod log;
mod output;
mod repl;

pub use api::{DEFAULT_BASE_URL, FileApiConfig};
pub use catalog::FileCatalogConfig;
pub use chat::FileChatConfig;
pub use log::FileLogConfig;
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems found in an otherwise parseable configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("api.base_url must start with http:// or https:// (got '{0}')")]
    InvalidBaseUrl(String),

    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },

    #[error("chat.{field} is set but empty")]
    EmptyText { field: &'static str },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend service settings
    pub api: FileApiConfig,
    /// Chat texts
    pub chat: FileChatConfig,
    /// Catalog settings
    pub catalog: FileCatalogConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Logging settings
    pub log: FileLogConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            issues.push(ConfigValidationError::InvalidBaseUrl(
                self.api.base_url.clone(),
            ));
        }

        if self.api.request_timeout_secs == 0 {
            issues.push(ConfigValidationError::ZeroValue {
                field: "api.request_timeout_secs",
            });
        }
        if self.api.stream_idle_timeout_secs == 0 {
            issues.push(ConfigValidationError::ZeroValue {
                field: "api.stream_idle_timeout_secs",
            });
        }
        if self.catalog.page_size == 0 {
            issues.push(ConfigValidationError::ZeroValue {
                field: "catalog.page_size",
            });
        }

        let texts = [
            ("stream_fallback", &self.chat.stream_fallback),
            ("recipe_prompt", &self.chat.recipe_prompt),
            ("recipe_fallback", &self.chat.recipe_fallback),
            ("description_fallback", &self.chat.description_fallback),
        ];
        for (field, value) in texts {
            if value.as_deref().is_some_and(|s| s.trim().is_empty()) {
                issues.push(ConfigValidationError::EmptyText { field });
            }
        }

        issues
    }
}
