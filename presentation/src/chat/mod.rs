//! Interactive chat module
//!
//! Provides a readline-based chat with the cooking assistant.

mod repl;

pub use repl::{ChatRepl, ReplCommand};
