//! Food entity

use serde::{Deserialize, Serialize};

/// Foods above this many calories count as heavy meals.
pub const HEAVY_CALORIE_THRESHOLD: f64 = 300.0;

/// Meal weight derived from calories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodType {
    Light,
    Heavy,
}

impl FoodType {
    pub fn from_calories(calories: f64) -> Self {
        if calories > HEAVY_CALORIE_THRESHOLD {
            FoodType::Heavy
        } else {
            FoodType::Light
        }
    }

    /// Display label used throughout the app.
    pub fn label(&self) -> &'static str {
        match self {
            FoodType::Light => "Makanan Ringan",
            FoodType::Heavy => "Makanan Berat",
        }
    }
}

/// A food from the catalog (Entity)
///
/// The service omits fields it does not know, so everything but the name
/// is optional or defaults to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub name: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub proteins: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub carbohydrate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portion: Option<String>,
}

impl Food {
    pub fn food_type(&self) -> FoodType {
        FoodType::from_calories(self.calories)
    }

    pub fn portion_or_default(&self) -> &str {
        self.portion.as_deref().unwrap_or("1 porsi")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        assert_eq!(FoodType::from_calories(300.0), FoodType::Light);
        assert_eq!(FoodType::from_calories(300.5), FoodType::Heavy);
        assert_eq!(FoodType::from_calories(0.0), FoodType::Light);
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let food: Food = serde_json::from_str(r#"{"name": "Nasi Goreng", "calories": 450}"#).unwrap();
        assert_eq!(food.name, "Nasi Goreng");
        assert_eq!(food.proteins, 0.0);
        assert_eq!(food.food_type(), FoodType::Heavy);
        assert_eq!(food.portion_or_default(), "1 porsi");
        assert!(food.image.is_none());
    }

    #[test]
    fn labels() {
        assert_eq!(FoodType::Heavy.label(), "Makanan Berat");
        assert_eq!(FoodType::Light.label(), "Makanan Ringan");
    }
}
