//! Application-level configuration.
//!
//! - [`ChatBehavior`]: user-facing fallback texts and the recipe prompt

pub mod chat_behavior;

pub use chat_behavior::ChatBehavior;
