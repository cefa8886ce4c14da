//! Use cases (application services)
//!
//! - [`stream_chat`]: the streaming chat session state machine
//! - [`food_assistant`]: recipe conversations and food descriptions
//! - [`browse_catalog`]: food catalog filtering and paging
//! - [`recommend`]: BMI and nutrition based recommendations

pub mod browse_catalog;
pub mod food_assistant;
pub mod recommend;
pub mod stream_chat;
