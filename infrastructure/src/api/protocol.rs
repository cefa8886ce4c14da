//! Wire types for the nutrition service HTTP API.

use nutrichat_domain::Food;
use serde::{Deserialize, Serialize};

pub const CHAT_STREAM_PATH: &str = "chat_stream";
pub const RECIPE_PATH: &str = "get_recipe";
pub const DESCRIPTION_PATH: &str = "get_description";
pub const FOODS_PATH: &str = "foods";
pub const RECOMMEND_BMI_PATH: &str = "recommend/bmi";
pub const RECOMMEND_NUTRITION_PATH: &str = "recommend/nutrition";
pub const HEALTH_PATH: &str = "health";

/// Body of the recipe and description requests
#[derive(Debug, Clone, Serialize)]
pub struct FoodNameBody<'a> {
    pub food_name: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecipeResponse {
    #[serde(default)]
    pub recipe: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DescriptionResponse {
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FoodsResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub foods: Vec<Food>,
    #[serde(default)]
    pub message: Option<String>,
}

impl FoodsResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}
