//! Output formatter trait

use nutrichat_application::{ApiHealth, CatalogPage};
use nutrichat_domain::{CatalogQuery, Recommendation, Turn};

/// Renders command results for the terminal
pub trait OutputFormatter {
    /// One page of the food catalog
    fn format_catalog(&self, page: &CatalogPage<'_>, query: &CatalogQuery) -> String;

    /// Recommendation result (success or service-reported failure)
    fn format_recommendation(&self, recommendation: &Recommendation) -> String;

    /// A recipe or description with its food name
    fn format_food_text(&self, food_name: &str, heading: &str, text: &str) -> String;

    /// Service health report
    fn format_health(&self, health: &ApiHealth) -> String;

    /// A finalized chat turn
    fn format_turn(&self, turn: &Turn) -> String;
}
