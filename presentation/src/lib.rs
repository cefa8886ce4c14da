//! Presentation layer for nutrichat
//!
//! This crate contains CLI definitions, output formatters,
//! the stream progress indicator, and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplCommand};
pub use cli::commands::{Cli, Command, FoodTypeArg, FoodsArgs, OutputFormat, RecommendCommand};
pub use config::{OutputConfig, ReplConfig};
pub use output::console::{ConsoleFormatter, JsonFormatter};
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{SimpleProgress, StreamIndicator, StreamProgressReporter};
