//! Food assistant use case.
//!
//! Opens the recipe conversation for a food and looks up food
//! descriptions. Follow-up questions in the recipe conversation go through
//! the [`StreamController`] that this use case seeds.

use crate::config::ChatBehavior;
use crate::ports::nutrition_api::NutritionApi;
use crate::use_cases::stream_chat::StreamController;
use nutrichat_domain::Turn;
use std::sync::Arc;
use tracing::{info, warn};

pub struct FoodAssistantUseCase {
    api: Arc<dyn NutritionApi>,
    behavior: ChatBehavior,
}

impl FoodAssistantUseCase {
    pub fn new(api: Arc<dyn NutritionApi>) -> Self {
        Self {
            api,
            behavior: ChatBehavior::default(),
        }
    }

    pub fn with_behavior(mut self, behavior: ChatBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Start a recipe conversation about `food_name` in `controller`.
    ///
    /// Any conversation already open in the controller is cancelled and
    /// cleared. Returns the assistant turn holding the recipe (or the
    /// recipe fallback text).
    pub async fn open_recipe(&self, controller: &mut StreamController, food_name: &str) -> Turn {
        info!("Opening recipe conversation for {}", food_name);
        controller
            .seed_with(
                &self.behavior.recipe_prompt,
                self.api.recipe(food_name),
                &self.behavior.recipe_fallback,
            )
            .await
    }

    /// Recipe of a food outside any conversation, or the recipe fallback.
    pub async fn recipe(&self, food_name: &str) -> String {
        match self.api.recipe(food_name).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => self.behavior.recipe_fallback.clone(),
            Err(e) => {
                warn!("Could not fetch recipe for {}: {}", food_name, e);
                self.behavior.recipe_fallback.clone()
            }
        }
    }

    /// Description of a food, or the description fallback text.
    pub async fn describe(&self, food_name: &str) -> String {
        match self.api.description(food_name).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => self.behavior.description_fallback.clone(),
            Err(e) => {
                warn!("Could not fetch description for {}: {}", food_name, e);
                self.behavior.description_fallback.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::chat_transport::{
        ChatRequest, ChatTransport, GatewayError, StreamSubscription,
    };
    use crate::ports::nutrition_api::ApiHealth;
    use async_trait::async_trait;
    use nutrichat_domain::{BmiRequest, Food, NutritionRequest, Recommendation, Role};

    // ==================== Test Mocks ====================

    struct CannedApi {
        recipe: Result<String, GatewayError>,
        description: Result<String, GatewayError>,
    }

    #[async_trait]
    impl NutritionApi for CannedApi {
        async fn recipe(&self, _food_name: &str) -> Result<String, GatewayError> {
            self.recipe.clone()
        }

        async fn description(&self, _food_name: &str) -> Result<String, GatewayError> {
            self.description.clone()
        }

        async fn foods(&self) -> Result<Vec<Food>, GatewayError> {
            Ok(Vec::new())
        }

        async fn recommend_by_bmi(
            &self,
            _request: &BmiRequest,
        ) -> Result<Recommendation, GatewayError> {
            Ok(Recommendation::default())
        }

        async fn recommend_by_nutrition(
            &self,
            _request: &NutritionRequest,
        ) -> Result<Recommendation, GatewayError> {
            Ok(Recommendation::default())
        }

        async fn health(&self) -> Result<ApiHealth, GatewayError> {
            Ok(ApiHealth::default())
        }
    }

    struct IdleTransport;

    impl ChatTransport for IdleTransport {
        fn open(&self, _request: ChatRequest) -> Result<StreamSubscription, GatewayError> {
            let (_tx, sub) = StreamSubscription::channel();
            Ok(sub)
        }
    }

    fn use_case(
        recipe: Result<String, GatewayError>,
        description: Result<String, GatewayError>,
    ) -> FoodAssistantUseCase {
        FoodAssistantUseCase::new(Arc::new(CannedApi {
            recipe,
            description,
        }))
    }

    #[tokio::test]
    async fn open_recipe_seeds_prompt_and_recipe() {
        let assistant = use_case(Ok("1. Rebus air".to_string()), Ok(String::new()));
        let mut controller = StreamController::new(Arc::new(IdleTransport));

        let turn = assistant.open_recipe(&mut controller, "Telur Rebus").await;
        assert_eq!(turn.content, "1. Rebus air");

        let turns: Vec<_> = controller.session().turns().cloned().collect();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].content, "Tolong berikan resep untuk masakan ini.");
        assert_eq!(turns[1].role, Role::Assistant);
        assert!(!controller.is_streaming());
    }

    #[tokio::test]
    async fn open_recipe_failure_uses_fallback() {
        let assistant = use_case(
            Err(GatewayError::ConnectionError("refused".to_string())),
            Ok(String::new()),
        );
        let mut controller = StreamController::new(Arc::new(IdleTransport));

        let turn = assistant.open_recipe(&mut controller, "Rendang").await;
        assert_eq!(turn.content, "Gagal mendapatkan resep.");
    }

    #[tokio::test]
    async fn open_recipe_replaces_running_conversation() {
        let assistant = use_case(Ok("Resep baru".to_string()), Ok(String::new()));
        let mut controller = StreamController::new(Arc::new(IdleTransport));
        controller.submit("pertanyaan lama").unwrap();
        assert!(controller.is_streaming());

        assistant.open_recipe(&mut controller, "Soto").await;
        assert!(!controller.is_streaming());
        assert_eq!(controller.session().len(), 2);
    }

    #[tokio::test]
    async fn standalone_recipe_falls_back() {
        let assistant = use_case(Ok("Tumis bumbu".to_string()), Ok(String::new()));
        assert_eq!(assistant.recipe("Rendang").await, "Tumis bumbu");

        let assistant = use_case(Err(GatewayError::Timeout), Ok(String::new()));
        assert_eq!(assistant.recipe("Rendang").await, "Gagal mendapatkan resep.");
    }

    #[tokio::test]
    async fn describe_falls_back() {
        let assistant = use_case(Ok(String::new()), Ok("Makanan khas Padang".to_string()));
        assert_eq!(assistant.describe("Rendang").await, "Makanan khas Padang");

        let assistant = use_case(Ok(String::new()), Err(GatewayError::Timeout));
        assert_eq!(
            assistant.describe("Rendang").await,
            "Gagal mendapatkan deskripsi makanan."
        );

        let assistant = use_case(Ok(String::new()), Ok("  ".to_string()));
        assert_eq!(
            assistant.describe("Rendang").await,
            "Gagal mendapatkan deskripsi makanan."
        );
    }
}
