//! Nutrition API port
//!
//! Plain request/response calls to the backend service. Everything that is
//! not the chat stream goes through here.

use super::chat_transport::GatewayError;
use async_trait::async_trait;
use nutrichat_domain::{BmiRequest, Food, NutritionRequest, Recommendation};
use serde::{Deserialize, Serialize};

/// Health report returned by the service
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiHealth {
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl ApiHealth {
    pub fn is_healthy(&self) -> bool {
        matches!(self.status.as_str(), "ok" | "healthy" | "success")
    }
}

/// Request/response access to the backend service.
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait NutritionApi: Send + Sync {
    /// Generated recipe text for a food.
    async fn recipe(&self, food_name: &str) -> Result<String, GatewayError>;

    /// Generated description text for a food.
    async fn description(&self, food_name: &str) -> Result<String, GatewayError>;

    /// The whole food catalog.
    async fn foods(&self) -> Result<Vec<Food>, GatewayError>;

    async fn recommend_by_bmi(&self, request: &BmiRequest) -> Result<Recommendation, GatewayError>;

    async fn recommend_by_nutrition(
        &self,
        request: &NutritionRequest,
    ) -> Result<Recommendation, GatewayError>;

    async fn health(&self) -> Result<ApiHealth, GatewayError>;
}
