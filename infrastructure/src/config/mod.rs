//! Configuration file loading for nutrichat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `NUTRICHAT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./nutrichat.toml` or `./.nutrichat.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/nutrichat/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_BASE_URL, FileApiConfig, FileCatalogConfig, FileChatConfig,
    FileConfig, FileLogConfig, FileOutputConfig, FileReplConfig,
};
pub use loader::ConfigLoader;
