//! Infrastructure layer for nutrichat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod api;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use api::{ApiError, HttpNutritionApi, Result, SseChatTransport};
pub use config::{
    ConfigLoader, ConfigValidationError, DEFAULT_BASE_URL, FileApiConfig, FileCatalogConfig,
    FileChatConfig, FileConfig, FileLogConfig, FileOutputConfig, FileReplConfig,
};
pub use logging::JsonlConversationLogger;
