//! HTTP client for the request/response endpoints.
//!
//! [`HttpNutritionApi`] implements the [`NutritionApi`] port on top of
//! `reqwest`. The service answers with JSON even on failure, so bodies are
//! parsed before the HTTP status is considered.

use crate::api::error::{ApiError, Result};
use crate::api::protocol::{
    DESCRIPTION_PATH, DescriptionResponse, FOODS_PATH, FoodNameBody, FoodsResponse, HEALTH_PATH,
    RECIPE_PATH, RECOMMEND_BMI_PATH, RECOMMEND_NUTRITION_PATH, RecipeResponse,
};
use async_trait::async_trait;
use nutrichat_application::{ApiHealth, GatewayError, NutritionApi};
use nutrichat_domain::util::truncate_str;
use nutrichat_domain::{BmiRequest, Food, NutritionRequest, Recommendation};
use reqwest::{Client, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};

/// Resolve `path` against the service base URL.
///
/// The base URL carries the `/api` prefix, so paths are appended rather
/// than resolved with URL join semantics.
pub fn endpoint_url(base_url: &str, path: &str) -> Result<Url> {
    let raw = format!(
        "{}/{}",
        base_url.trim().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&raw).map_err(|e| ApiError::InvalidUrl {
        url: raw.clone(),
        reason: e.to_string(),
    })
}

/// Nutrition service client
#[derive(Debug, Clone)]
pub struct HttpNutritionApi {
    client: Client,
    base_url: String,
}

impl HttpNutritionApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = endpoint_url(&self.base_url, path)?;
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::read_json(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = endpoint_url(&self.base_url, path)?;
        debug!("POST {}", url);
        let response = self.client.post(url).json(body).send().await?;
        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let raw = response.text().await?;
        trace!("{} response: {}", status, truncate_str(&raw, 500));
        parse_body(status.as_u16(), status.is_success(), &raw)
    }

    pub async fn fetch_recipe(&self, food_name: &str) -> Result<String> {
        let response: RecipeResponse = self
            .post_json(RECIPE_PATH, &FoodNameBody { food_name })
            .await?;
        response.recipe.ok_or(ApiError::MissingField("recipe"))
    }

    pub async fn fetch_description(&self, food_name: &str) -> Result<String> {
        let response: DescriptionResponse = self
            .post_json(DESCRIPTION_PATH, &FoodNameBody { food_name })
            .await?;
        response
            .description
            .ok_or(ApiError::MissingField("description"))
    }

    pub async fn fetch_foods(&self) -> Result<Vec<Food>> {
        let response: FoodsResponse = self.get_json(FOODS_PATH).await?;
        if !response.is_success() {
            return Err(ApiError::Service(response.message.unwrap_or_default()));
        }
        Ok(response.foods)
    }
}

/// Parse a response body, falling back to a status error when the body is
/// not the expected JSON and the status was not a success.
fn parse_body<T: DeserializeOwned>(status: u16, success: bool, raw: &str) -> Result<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Ok(value),
        Err(_) if !success => Err(ApiError::Status {
            status,
            body: truncate_str(raw, 200).to_string(),
        }),
        Err(e) => Err(ApiError::ParseError {
            error: e.to_string(),
            raw: truncate_str(raw, 200).to_string(),
        }),
    }
}

#[async_trait]
impl NutritionApi for HttpNutritionApi {
    async fn recipe(&self, food_name: &str) -> std::result::Result<String, GatewayError> {
        Ok(self.fetch_recipe(food_name).await?)
    }

    async fn description(&self, food_name: &str) -> std::result::Result<String, GatewayError> {
        Ok(self.fetch_description(food_name).await?)
    }

    async fn foods(&self) -> std::result::Result<Vec<Food>, GatewayError> {
        Ok(self.fetch_foods().await?)
    }

    async fn recommend_by_bmi(
        &self,
        request: &BmiRequest,
    ) -> std::result::Result<Recommendation, GatewayError> {
        Ok(self.post_json(RECOMMEND_BMI_PATH, request).await?)
    }

    async fn recommend_by_nutrition(
        &self,
        request: &NutritionRequest,
    ) -> std::result::Result<Recommendation, GatewayError> {
        Ok(self.post_json(RECOMMEND_NUTRITION_PATH, request).await?)
    }

    async fn health(&self) -> std::result::Result<ApiHealth, GatewayError> {
        Ok(self.get_json(HEALTH_PATH).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_appends_to_api_prefix() {
        let url = endpoint_url("http://127.0.0.1:5000/api", "get_recipe").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/api/get_recipe");

        let url = endpoint_url("http://127.0.0.1:5000/api/", "/recommend/bmi").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/api/recommend/bmi");
    }

    #[test]
    fn endpoint_url_rejects_garbage() {
        let err = endpoint_url("not a url", "foods").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
    }

    #[test]
    fn error_json_with_failure_status_is_still_parsed() {
        let rec: Recommendation = parse_body(
            400,
            false,
            r#"{"status": "error", "message": "Input tidak valid"}"#,
        )
        .unwrap();
        assert_eq!(rec.failure_message(), "Input tidak valid");
    }

    #[test]
    fn non_json_failure_becomes_status_error() {
        let err = parse_body::<Recommendation>(502, false, "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 502, .. }));
    }

    #[test]
    fn non_json_success_is_parse_error() {
        let err = parse_body::<Recommendation>(200, true, "oops").unwrap_err();
        assert!(matches!(err, ApiError::ParseError { .. }));
    }

    #[tokio::test]
    async fn unreachable_service_maps_to_gateway_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let api = HttpNutritionApi::new("http://127.0.0.1:9/api", Duration::from_secs(2)).unwrap();
        let err = api.recipe("Rendang").await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::ConnectionError(_) | GatewayError::RequestFailed(_) | GatewayError::Timeout
        ));
    }
}
