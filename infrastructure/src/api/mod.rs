//! Adapters for the nutrition service HTTP API.
//!
//! - [`client`]: request/response endpoints ([`HttpNutritionApi`])
//! - [`sse`]: the streaming chat endpoint ([`SseChatTransport`])

pub mod client;
pub mod error;
pub mod protocol;
pub mod sse;

pub use client::HttpNutritionApi;
pub use error::{ApiError, Result};
pub use sse::SseChatTransport;
