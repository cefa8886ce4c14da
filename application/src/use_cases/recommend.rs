//! Recommend use case.
//!
//! Validates the form input and asks the service for food recommendations
//! by BMI or by nutrition targets.

use crate::ports::chat_transport::GatewayError;
use crate::ports::nutrition_api::NutritionApi;
use nutrichat_domain::{BmiRequest, DomainError, NutritionRequest, Recommendation};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

pub const CONNECTION_FAILURE: &str = "Gagal terhubung ke server";

#[derive(Error, Debug)]
pub enum RecommendError {
    #[error(transparent)]
    InvalidInput(#[from] DomainError),

    /// The service answered but reported a failure.
    #[error("{0}")]
    Rejected(String),

    #[error("Gagal terhubung ke server")]
    Gateway(#[source] GatewayError),
}

/// Which recommendation to ask for
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendInput {
    Bmi(BmiRequest),
    Nutrition(NutritionRequest),
}

pub struct RecommendUseCase {
    api: Arc<dyn NutritionApi>,
}

impl RecommendUseCase {
    pub fn new(api: Arc<dyn NutritionApi>) -> Self {
        Self { api }
    }

    pub async fn execute(&self, input: RecommendInput) -> Result<Recommendation, RecommendError> {
        let result = match &input {
            RecommendInput::Bmi(request) => {
                request.validate()?;
                info!(
                    "Requesting BMI recommendation ({} kg, {} cm, {})",
                    request.weight, request.height, request.meal_time
                );
                self.api.recommend_by_bmi(request).await
            }
            RecommendInput::Nutrition(request) => {
                request.validate()?;
                info!(
                    "Requesting nutrition recommendation ({} kcal, {})",
                    request.calories, request.meal_time
                );
                self.api.recommend_by_nutrition(request).await
            }
        };

        let recommendation = result.map_err(|e| {
            warn!("Error getting recommendations: {}", e);
            RecommendError::Gateway(e)
        })?;

        if !recommendation.is_success() {
            return Err(RecommendError::Rejected(
                recommendation.failure_message().to_string(),
            ));
        }
        info!(
            "Received {} recommendations",
            recommendation.recommendations.len()
        );
        Ok(recommendation)
    }
}
