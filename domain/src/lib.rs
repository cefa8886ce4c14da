//! Domain layer for nutrichat
//!
//! This crate contains the core entities and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Chat session
//!
//! A conversation with the cooking assistant is an ordered list of
//! [`Turn`]s. While a reply streams in, the session holds exactly one
//! extra turn with the transient `streaming` role, always in last position.
//! Finalizing it turns it into a normal assistant turn.
//!
//! ## Food catalog
//!
//! The catalog is filtered by meal weight and name, then split into pages.

pub mod catalog;
pub mod chat;
pub mod core;
pub mod recommendation;
pub mod util;

// Re-export commonly used types
pub use catalog::{
    food::{Food, FoodType, HEAVY_CALORIE_THRESHOLD},
    page::{Page, Pagination},
    query::{CatalogQuery, FoodTypeFilter},
};
pub use chat::{
    session::{ChatSession, SessionError},
    stream::{DONE_SENTINEL, StreamEvent, SubscriptionId},
    turn::{Role, Turn, WireRole, WireTurn},
};
pub use core::{error::DomainError, question::Question};
pub use recommendation::{
    BmiRequest, MealTime, NutritionNeeds, NutritionRequest, Recommendation,
};
