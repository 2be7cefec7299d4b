use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Lenient parse; anything unrecognised becomes `Medium`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "easy" | "beginner" | "simple" => Difficulty::Easy,
            "hard" | "difficult" | "advanced" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    pub amount: String,
    pub unit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Canonical recipe record, whether stored or synthesized from a model reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub description: String,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub calories: u32,
    pub cuisine_type: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
    pub nutrition: Option<Nutrition>,
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    pub fn total_time(&self) -> u32 {
        self.prep_time.saturating_add(self.cook_time)
    }

    pub fn ingredient_names(&self) -> Vec<&str> {
        self.ingredients.iter().map(|i| i.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse_is_lenient() {
        assert_eq!(Difficulty::parse_lenient(" EASY "), Difficulty::Easy);
        assert_eq!(Difficulty::parse_lenient("Difficult"), Difficulty::Hard);
        assert_eq!(Difficulty::parse_lenient("moderate"), Difficulty::Medium);
        assert_eq!(Difficulty::parse_lenient(""), Difficulty::Medium);
    }

    #[test]
    fn test_recipe_serializes_camel_case() {
        let recipe = Recipe {
            id: "r1".into(),
            title: "Soup".into(),
            description: String::new(),
            prep_time: 10,
            cook_time: 20,
            servings: 2,
            difficulty: Difficulty::Easy,
            calories: 200,
            cuisine_type: "Levantine".into(),
            ingredients: vec![],
            instructions: vec![],
            tags: vec![],
            nutrition: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["prepTime"], 10);
        assert_eq!(json["cuisineType"], "Levantine");
        assert_eq!(json["difficulty"], "Easy");
        assert_eq!(recipe.total_time(), 30);
    }

    #[test]
    fn test_total_time_saturates() {
        let raw = serde_json::json!({"title": "Slow Stew", "prepTime": 4294967295u64, "cookTime": 30});
        let recipe = crate::recipes::normalize::normalize_recipes(&[raw]).remove(0);
        assert_eq!(recipe.prep_time, u32::MAX);
        assert_eq!(recipe.total_time(), u32::MAX);
    }
}
