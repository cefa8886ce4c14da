//! Application layer for nutrichat
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ChatBehavior;
pub use ports::{
    chat_transport::{ChatRequest, ChatTransport, GatewayError, StreamSender, StreamSubscription},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    nutrition_api::{ApiHealth, NutritionApi},
};
pub use use_cases::browse_catalog::{
    BrowseCatalogError, BrowseCatalogUseCase, CatalogPage, FoodCatalog,
};
pub use use_cases::food_assistant::FoodAssistantUseCase;
pub use use_cases::recommend::{RecommendError, RecommendInput, RecommendUseCase};
pub use use_cases::stream_chat::{StreamController, StreamProgress, StreamState, SubmitError};
