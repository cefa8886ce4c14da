//! Recommendation requests and results.
//!
//! The recommendation algorithm itself lives in the external service. This
//! module only describes what is sent and what comes back.

use crate::catalog::food::{Food, FoodType};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default message when the service reports a failure without one.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Terjadi kesalahan saat mendapatkan rekomendasi";

/// Meal the recommendation is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MealTime {
    Pagi,
    #[default]
    Siang,
    Malam,
}

impl MealTime {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealTime::Pagi => "Pagi",
            MealTime::Siang => "Siang",
            MealTime::Malam => "Malam",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MealTime::Pagi => "Sarapan",
            MealTime::Siang => "Makan Siang",
            MealTime::Malam => "Makan Malam",
        }
    }

    /// Breakfast suggestions are light, the other meals are heavy.
    pub fn food_type(&self) -> FoodType {
        match self {
            MealTime::Pagi => FoodType::Light,
            MealTime::Siang | MealTime::Malam => FoodType::Heavy,
        }
    }
}

impl std::fmt::Display for MealTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealTime {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pagi" | "breakfast" => Ok(MealTime::Pagi),
            "siang" | "lunch" => Ok(MealTime::Siang),
            "malam" | "dinner" => Ok(MealTime::Malam),
            _ => Err(DomainError::UnknownMealTime(s.to_string())),
        }
    }
}

/// Recommendation by body measurements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiRequest {
    /// Weight in kilograms
    pub weight: f64,
    /// Height in centimeters
    pub height: f64,
    pub meal_time: MealTime,
}

impl BmiRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(DomainError::InvalidRecommendationInput(
                "weight must be greater than zero".to_string(),
            ));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(DomainError::InvalidRecommendationInput(
                "height must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Recommendation by nutrition targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionRequest {
    pub calories: f64,
    pub proteins: f64,
    pub fat: f64,
    pub carbohydrate: f64,
    pub meal_time: MealTime,
}

impl NutritionRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        let fields = [
            ("calories", self.calories),
            ("proteins", self.proteins),
            ("fat", self.fat),
            ("carbohydrate", self.carbohydrate),
        ];
        for (name, value) in fields {
            if !(value.is_finite() && value >= 0.0) {
                return Err(DomainError::InvalidRecommendationInput(format!(
                    "{name} must be a non-negative number"
                )));
            }
        }
        Ok(())
    }
}

/// Daily nutrition needs computed by the service
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NutritionNeeds {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub proteins: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub carbohydrate: f64,
}

/// Recommendation response body
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub bmi: Option<f64>,
    #[serde(default)]
    pub bmi_category: Option<String>,
    #[serde(default)]
    pub nutrition_needs: Option<NutritionNeeds>,
    #[serde(default)]
    pub recommendations: Vec<Food>,
    #[serde(default)]
    pub request_data: Option<serde_json::Value>,
    #[serde(default)]
    pub meal_time: Option<String>,
    #[serde(default, rename = "mealTime")]
    pub meal_time_camel: Option<String>,
}

impl Recommendation {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    pub fn failure_message(&self) -> &str {
        self.message.as_deref().unwrap_or(DEFAULT_FAILURE_MESSAGE)
    }

    /// Meal time the service answered for.
    ///
    /// Looks in the echoed request first, then at the top level, accepting
    /// both snake and camel case. Falls back to lunch.
    pub fn meal_time(&self) -> MealTime {
        let from_request = self.request_data.as_ref().and_then(|data| {
            data.get("meal_time")
                .or_else(|| data.get("mealTime"))
                .and_then(|v| v.as_str())
        });
        from_request
            .or(self.meal_time.as_deref())
            .or(self.meal_time_camel.as_deref())
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_time_parses_case_insensitively() {
        assert_eq!("pagi".parse::<MealTime>().unwrap(), MealTime::Pagi);
        assert_eq!("Malam".parse::<MealTime>().unwrap(), MealTime::Malam);
        assert!("sore".parse::<MealTime>().is_err());
    }

    #[test]
    fn meal_time_serializes_as_label() {
        let request = BmiRequest {
            weight: 60.0,
            height: 170.0,
            meal_time: MealTime::Pagi,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["meal_time"], "Pagi");
    }

    #[test]
    fn bmi_validation() {
        let mut request = BmiRequest {
            weight: 60.0,
            height: 170.0,
            meal_time: MealTime::Siang,
        };
        assert!(request.validate().is_ok());
        request.height = 0.0;
        assert!(request.validate().is_err());
        request.height = 170.0;
        request.weight = f64::NAN;
        assert!(request.validate().is_err());
    }

    #[test]
    fn nutrition_validation_names_the_field() {
        let request = NutritionRequest {
            calories: 500.0,
            proteins: -1.0,
            fat: 10.0,
            carbohydrate: 60.0,
            meal_time: MealTime::Malam,
        };
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("proteins"));
    }

    #[test]
    fn meal_time_resolution_order() {
        let mut rec: Recommendation = serde_json::from_value(serde_json::json!({
            "status": "success",
            "request_data": {"mealTime": "Pagi"},
            "meal_time": "Malam"
        }))
        .unwrap();
        assert_eq!(rec.meal_time(), MealTime::Pagi);

        rec.request_data = None;
        assert_eq!(rec.meal_time(), MealTime::Malam);

        rec.meal_time = None;
        assert_eq!(rec.meal_time(), MealTime::Siang);
    }

    #[test]
    fn failure_message_falls_back() {
        let rec = Recommendation {
            status: "error".to_string(),
            ..Default::default()
        };
        assert!(!rec.is_success());
        assert_eq!(rec.failure_message(), DEFAULT_FAILURE_MESSAGE);
    }
}
