//! Console output formatters

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use nutrichat_application::{ApiHealth, CatalogPage};
use nutrichat_domain::{CatalogQuery, Food, FoodType, Recommendation, Role, Turn};

/// Formats results as colored text
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format one catalog page
    pub fn format_catalog(page: &CatalogPage<'_>, query: &CatalogQuery) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Katalog Makanan"));
        output.push('\n');

        let mut filters = Vec::new();
        if let Some(badge) = query.food_type.badge() {
            filters.push(badge.yellow().to_string());
        }
        if !query.search.trim().is_empty() {
            filters.push(format!("\"{}\"", query.search.trim()));
        }
        if !filters.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Filter:".cyan().bold(),
                filters.join(", ")
            ));
        }
        output.push('\n');

        if page.items.is_empty() {
            output.push_str(&format!("{}\n", "Tidak ada makanan yang cocok.".dimmed()));
            return output;
        }

        for (i, food) in page.items.iter().enumerate() {
            output.push_str(&format!(
                "{:>4}. {}\n",
                page.offset + i + 1,
                Self::food_line(food, food.food_type())
            ));
        }

        output.push('\n');
        output.push_str(&Self::pager(page));
        output.push('\n');
        output
    }

    /// Format a recommendation result
    pub fn format_recommendation(recommendation: &Recommendation) -> String {
        if !recommendation.is_success() {
            return format!(
                "{} {}\n",
                "Gagal:".red().bold(),
                recommendation.failure_message()
            );
        }

        let meal_time = recommendation.meal_time();
        let mut output = String::new();
        output.push_str(&Self::header(&format!("Rekomendasi {}", meal_time.description())));
        output.push('\n');

        if let Some(bmi) = recommendation.bmi {
            output.push_str(&format!(
                "{} {:.1} ({})\n",
                "BMI:".cyan().bold(),
                bmi,
                recommendation.bmi_category.as_deref().unwrap_or("-")
            ));
        }

        if let Some(needs) = &recommendation.nutrition_needs {
            output.push_str(&Self::section_header("Kebutuhan Nutrisi"));
            output.push_str(&format!("  Kalori       {:>8.0} kcal\n", needs.calories));
            output.push_str(&format!("  Protein      {:>8.1} g\n", needs.proteins));
            output.push_str(&format!("  Lemak        {:>8.1} g\n", needs.fat));
            output.push_str(&format!("  Karbohidrat  {:>8.1} g\n", needs.carbohydrate));
        }

        output.push_str(&Self::section_header(&format!(
            "Rekomendasi Makanan ({} makanan)",
            recommendation.recommendations.len()
        )));
        let food_type = meal_time.food_type();
        for food in &recommendation.recommendations {
            output.push_str(&format!("  * {}\n", Self::food_line(food, food_type)));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format recipe or description text
    pub fn format_food_text(food_name: &str, heading: &str, text: &str) -> String {
        format!(
            "{}\n{}\n\n{}\n",
            format!("{}: {}", heading, food_name).cyan().bold(),
            "-".repeat(40),
            text.trim_end()
        )
    }

    /// Format the health report
    pub fn format_health(health: &ApiHealth) -> String {
        let status = if health.is_healthy() {
            health.status.green().bold()
        } else {
            health.status.red().bold()
        };
        let mut output = format!("{} {}\n", "Status:".cyan().bold(), status);
        for (key, value) in &health.details {
            let value = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            output.push_str(&format!("  {}: {}\n", key, value));
        }
        output
    }

    /// Format one chat turn with its speaker
    pub fn format_turn(turn: &Turn) -> String {
        let speaker = match turn.role {
            Role::User => "Anda".green().bold(),
            Role::Assistant => "Asisten".cyan().bold(),
            Role::Streaming => "Asisten ...".cyan().dimmed(),
        };
        format!("{}\n{}\n", speaker, Self::indent(turn.content.trim_end(), "  "))
    }

    fn food_line(food: &Food, food_type: FoodType) -> String {
        let label = match food_type {
            FoodType::Heavy => food_type.label().magenta(),
            FoodType::Light => food_type.label().green(),
        };
        format!(
            "{}  {}  {:.0} kcal | P {:.1}g | L {:.1}g | K {:.1}g  {}",
            food.name.bold(),
            label,
            food.calories,
            food.proteins,
            food.fat,
            food.carbohydrate,
            format!("({})", food.portion_or_default()).dimmed()
        )
    }

    fn pager(page: &CatalogPage<'_>) -> String {
        let numbers: Vec<String> = page
            .page_range
            .iter()
            .map(|&n| {
                if n == page.current {
                    format!("[{}]", n).bold().to_string()
                } else {
                    n.to_string()
                }
            })
            .collect();
        let prev = if page.current > 1 { "<" } else { " " };
        let next = if page.current < page.total_pages { ">" } else { " " };
        format!(
            "{} {} {}  Halaman {} dari {} ({} makanan)",
            prev,
            numbers.join(" "),
            next,
            page.current,
            page.total_pages,
            page.total_items
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_catalog(&self, page: &CatalogPage<'_>, query: &CatalogQuery) -> String {
        Self::format_catalog(page, query)
    }

    fn format_recommendation(&self, recommendation: &Recommendation) -> String {
        Self::format_recommendation(recommendation)
    }

    fn format_food_text(&self, food_name: &str, heading: &str, text: &str) -> String {
        Self::format_food_text(food_name, heading, text)
    }

    fn format_health(&self, health: &ApiHealth) -> String {
        Self::format_health(health)
    }

    fn format_turn(&self, turn: &Turn) -> String {
        Self::format_turn(turn)
    }
}

/// Formats results as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    fn pretty(value: &serde_json::Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_catalog(&self, page: &CatalogPage<'_>, query: &CatalogQuery) -> String {
        Self::pretty(&serde_json::json!({
            "search": query.search,
            "food_type": query.food_type.badge(),
            "page": page.current,
            "total_pages": page.total_pages,
            "total_items": page.total_items,
            "page_range": page.page_range,
            "foods": page.items,
        }))
    }

    fn format_recommendation(&self, recommendation: &Recommendation) -> String {
        serde_json::to_string_pretty(recommendation).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_food_text(&self, food_name: &str, heading: &str, text: &str) -> String {
        let mut map = serde_json::Map::new();
        map.insert("food_name".to_string(), food_name.into());
        map.insert(heading.to_lowercase(), text.into());
        Self::pretty(&serde_json::Value::Object(map))
    }

    fn format_health(&self, health: &ApiHealth) -> String {
        serde_json::to_string_pretty(health).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_turn(&self, turn: &Turn) -> String {
        serde_json::to_string(&turn.to_wire()).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutrichat_domain::{MealTime, NutritionNeeds};

    fn food(name: &str, calories: f64) -> Food {
        serde_json::from_value(serde_json::json!({
            "name": name,
            "calories": calories,
            "proteins": 10.0,
            "fat": 5.0,
            "carbohydrate": 20.0
        }))
        .unwrap()
    }

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn catalog_page_numbers_items_across_pages() {
        plain();
        let foods: Vec<Food> = (1..=7).map(|i| food(&format!("Makanan {}", i), 100.0)).collect();
        let refs: Vec<&Food> = foods.iter().collect();
        let page = CatalogPage {
            items: refs[3..6].to_vec(),
            offset: 3,
            page_range: vec![1, 2, 3],
            current: 2,
            total_pages: 3,
            total_items: 7,
        };
        let text = ConsoleFormatter::format_catalog(&page, &CatalogQuery::new());
        assert!(text.contains("   4. Makanan 4"));
        assert!(text.contains("   6. Makanan 6"));
        assert!(text.contains("1 [2] 3"));
        assert!(text.contains("Halaman 2 dari 3 (7 makanan)"));
    }

    #[test]
    fn short_last_page_keeps_numbering() {
        plain();
        let foods: Vec<Food> = (1..=7).map(|i| food(&format!("Makanan {}", i), 100.0)).collect();
        let refs: Vec<&Food> = foods.iter().collect();
        let page = CatalogPage {
            items: refs[6..].to_vec(),
            offset: 6,
            page_range: vec![1, 2, 3],
            current: 3,
            total_pages: 3,
            total_items: 7,
        };
        let text = ConsoleFormatter::format_catalog(&page, &CatalogQuery::new());
        assert!(text.contains("   7. Makanan 7"));
    }

    #[test]
    fn empty_catalog_page() {
        plain();
        let page = CatalogPage {
            items: Vec::new(),
            offset: 0,
            page_range: vec![1],
            current: 1,
            total_pages: 1,
            total_items: 0,
        };
        let query = CatalogQuery::new().with_search("rendang");
        let text = ConsoleFormatter::format_catalog(&page, &query);
        assert!(text.contains("\"rendang\""));
        assert!(text.contains("Tidak ada makanan yang cocok."));
    }

    #[test]
    fn recommendation_labels_foods_by_meal_time() {
        plain();
        let rec = Recommendation {
            status: "success".to_string(),
            bmi: Some(22.04),
            bmi_category: Some("Normal".to_string()),
            nutrition_needs: Some(NutritionNeeds {
                calories: 2000.0,
                proteins: 50.0,
                fat: 60.0,
                carbohydrate: 300.0,
            }),
            recommendations: vec![food("Bubur Ayam", 450.0)],
            meal_time: Some(MealTime::Pagi.to_string()),
            ..Default::default()
        };
        let text = ConsoleFormatter::format_recommendation(&rec);
        assert!(text.contains("Rekomendasi Sarapan"));
        assert!(text.contains("22.0 (Normal)"));
        // Breakfast items are labeled light regardless of calories.
        assert!(text.contains("Bubur Ayam  Makanan Ringan"));
    }

    #[test]
    fn failed_recommendation_shows_message() {
        plain();
        let rec = Recommendation {
            status: "error".to_string(),
            message: Some("Berat badan tidak valid".to_string()),
            ..Default::default()
        };
        assert_eq!(
            ConsoleFormatter::format_recommendation(&rec),
            "Gagal: Berat badan tidak valid\n"
        );
    }

    #[test]
    fn turn_shows_speaker() {
        plain();
        let text = ConsoleFormatter::format_turn(&Turn::assistant("Baris 1\nBaris 2"));
        assert_eq!(text, "Asisten\n  Baris 1\n  Baris 2\n");
    }

    #[test]
    fn json_food_text_uses_heading_as_key() {
        let text = JsonFormatter.format_food_text("Soto", "Resep", "Rebus ayam.");
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["food_name"], "Soto");
        assert_eq!(value["resep"], "Rebus ayam.");
    }

    #[test]
    fn json_turn_uses_wire_shape() {
        let text = JsonFormatter.format_turn(&Turn::user("Halo"));
        assert_eq!(text, r#"{"role":"user","content":"Halo"}"#);
    }
}
