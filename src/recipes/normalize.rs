use chrono::Utc;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::model::{Difficulty, Nutrition, Recipe, RecipeIngredient};

pub const DEFAULT_PREP_TIME: u32 = 15;
pub const DEFAULT_COOK_TIME: u32 = 30;
pub const DEFAULT_SERVINGS: u32 = 4;
pub const DEFAULT_CALORIES: u32 = 300;
pub const DEFAULT_CUISINE: &str = "Fusion";
pub const AI_GENERATED_TAG: &str = "AI Generated";
const DEFAULT_AMOUNT: &str = "1";
const DEFAULT_UNIT: &str = "piece";

/// Maps every raw entry to a `Recipe`; the output has the same length as the input.
pub fn normalize_recipes(raw: &[Value]) -> Vec<Recipe> {
    raw.iter()
        .enumerate()
        .map(|(index, value)| normalize_recipe(value, index))
        .collect()
}

/// `index` is zero-based and only used for the placeholder title.
pub fn normalize_recipe(raw: &Value, index: usize) -> Recipe {
    let empty = Map::new();
    let obj = match raw {
        Value::Object(map) => map,
        _ => &empty,
    };

    let title = text_field(obj, &["title", "name"])
        .or_else(|| raw.as_str().map(str::trim).filter(|s| !s.is_empty()).map(String::from))
        .unwrap_or_else(|| format!("Recipe {}", index + 1));

    let tags = string_list(obj, &["tags"]);

    Recipe {
        id: text_field(obj, &["id"]).unwrap_or_else(|| Uuid::new_v4().to_string()),
        title,
        description: text_field(obj, &["description", "summary"]).unwrap_or_default(),
        prep_time: number_field(obj, &["prepTime", "prep_time"]).unwrap_or(DEFAULT_PREP_TIME),
        cook_time: number_field(obj, &["cookTime", "cook_time"]).unwrap_or(DEFAULT_COOK_TIME),
        servings: number_field(obj, &["servings"]).unwrap_or(DEFAULT_SERVINGS),
        difficulty: text_field(obj, &["difficulty"])
            .map(|d| Difficulty::parse_lenient(&d))
            .unwrap_or_default(),
        calories: number_field(obj, &["calories"]).unwrap_or(DEFAULT_CALORIES),
        cuisine_type: text_field(obj, &["cuisineType", "cuisine_type", "cuisine"])
            .unwrap_or_else(|| DEFAULT_CUISINE.to_string()),
        ingredients: lookup(obj, &["ingredients"])
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(normalize_ingredient).collect())
            .unwrap_or_default(),
        instructions: instructions(obj),
        tags: if tags.is_empty() { vec![AI_GENERATED_TAG.to_string()] } else { tags },
        nutrition: lookup(obj, &["nutrition"]).and_then(nutrition),
        created_at: Utc::now(),
    }
}

/// Accepts `"2 eggs"` or `{ name|item, amount|quantity, unit }`.
pub fn normalize_ingredient(raw: &Value) -> Option<RecipeIngredient> {
    match raw {
        Value::String(s) if !s.trim().is_empty() => Some(RecipeIngredient {
            name: s.trim().to_string(),
            amount: DEFAULT_AMOUNT.to_string(),
            unit: DEFAULT_UNIT.to_string(),
        }),
        Value::Object(obj) => {
            let name = text_field(obj, &["name", "item", "ingredient"])?;
            Some(RecipeIngredient {
                name,
                amount: text_field(obj, &["amount", "quantity"])
                    .unwrap_or_else(|| DEFAULT_AMOUNT.to_string()),
                unit: text_field(obj, &["unit"]).unwrap_or_else(|| DEFAULT_UNIT.to_string()),
            })
        }
        _ => None,
    }
}

fn lookup<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| obj.get(*key)).filter(|v| !v.is_null())
}

/// Strings are trimmed; numbers and booleans are rendered as text.
fn text_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    match lookup(obj, keys)? {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Numbers, or strings with a leading integer such as `"20 minutes"`.
fn number_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<u32> {
    match lookup(obj, keys)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => leading_integer(s),
        _ => None,
    }
}

fn leading_integer(s: &str) -> Option<u32> {
    let digits: String = s.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

fn float_field(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let numeric: String = s
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            numeric.parse().ok()
        }
        _ => None,
    }
}

fn string_list(obj: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    match lookup(obj, keys) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

fn instructions(obj: &Map<String, Value>) -> Vec<String> {
    match lookup(obj, &["instructions", "steps"]) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|step| match step {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Object(o) => text_field(o, &["step", "text", "instruction", "description"]),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) => s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

fn nutrition(value: &Value) -> Option<Nutrition> {
    let obj = value.as_object()?;
    let protein = float_field(obj, "protein");
    let carbs = float_field(obj, "carbs").or_else(|| float_field(obj, "carbohydrates"));
    let fat = float_field(obj, "fat");
    if protein.is_none() && carbs.is_none() && fat.is_none() {
        return None;
    }
    Some(Nutrition {
        protein: protein.unwrap_or_default(),
        carbs: carbs.unwrap_or_default(),
        fat: fat.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_gets_every_default() {
        let recipe = normalize_recipe(&json!({}), 0);
        assert_eq!(recipe.title, "Recipe 1");
        assert_eq!(recipe.prep_time, 15);
        assert_eq!(recipe.cook_time, 30);
        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.calories, 300);
        assert_eq!(recipe.cuisine_type, "Fusion");
        assert_eq!(recipe.difficulty, Difficulty::Medium);
        assert_eq!(recipe.tags, vec!["AI Generated".to_string()]);
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.nutrition.is_none());
        assert!(Uuid::parse_str(&recipe.id).is_ok());
    }

    #[test]
    fn test_full_object_is_kept() {
        let raw = json!({
            "id": "abc",
            "title": "Chicken Kabsa",
            "description": "Spiced rice",
            "prepTime": 20,
            "cookTime": "45 minutes",
            "servings": 6,
            "difficulty": "hard",
            "calories": 512.6,
            "cuisineType": "Saudi",
            "ingredients": [
                "2 cups basmati rice",
                { "name": "chicken", "amount": 1.5, "unit": "kg" },
                { "item": "cardamom", "quantity": "4" },
                { "amount": 3 },
                42
            ],
            "instructions": ["Rinse rice.", { "step": "Brown chicken [10m]." }, ""],
            "tags": ["Rice", "Dinner"],
            "nutrition": { "protein": "35g", "carbs": 60, "fat": 14.5 }
        });

        let recipe = normalize_recipe(&raw, 3);
        assert_eq!(recipe.id, "abc");
        assert_eq!(recipe.cook_time, 45);
        assert_eq!(recipe.calories, 513);
        assert_eq!(recipe.difficulty, Difficulty::Hard);
        assert_eq!(recipe.cuisine_type, "Saudi");
        assert_eq!(recipe.ingredient_names(), vec!["2 cups basmati rice", "chicken", "cardamom"]);
        assert_eq!(recipe.ingredients[0].unit, "piece");
        assert_eq!(recipe.ingredients[1].amount, "1.5");
        assert_eq!(recipe.ingredients[2].amount, "4");
        assert_eq!(recipe.instructions, vec!["Rinse rice.", "Brown chicken [10m]."]);
        assert_eq!(recipe.tags, vec!["Rice", "Dinner"]);
        assert_eq!(
            recipe.nutrition,
            Some(Nutrition { protein: 35.0, carbs: 60.0, fat: 14.5 })
        );
    }

    #[test]
    fn test_snake_case_and_alternate_keys() {
        let raw = json!({
            "name": "Lentil Soup",
            "prep_time": 5,
            "cuisine": "Turkish",
            "steps": "Boil lentils.\n\nBlend.",
            "tags": "Soup, Vegan"
        });
        let recipe = normalize_recipe(&raw, 0);
        assert_eq!(recipe.title, "Lentil Soup");
        assert_eq!(recipe.prep_time, 5);
        assert_eq!(recipe.cuisine_type, "Turkish");
        assert_eq!(recipe.instructions, vec!["Boil lentils.", "Blend."]);
        assert_eq!(recipe.tags, vec!["Soup", "Vegan"]);
    }

    #[test]
    fn test_non_object_entries_keep_length() {
        let raw = vec![json!("Shakshuka"), json!(7), json!(null), json!({ "title": "Fattoush" })];
        let recipes = normalize_recipes(&raw);
        assert_eq!(recipes.len(), 4);
        assert_eq!(recipes[0].title, "Shakshuka");
        assert_eq!(recipes[1].title, "Recipe 2");
        assert_eq!(recipes[2].title, "Recipe 3");
        assert_eq!(recipes[3].title, "Fattoush");
    }

    #[test]
    fn test_negative_and_garbage_numbers_fall_back() {
        let raw = json!({ "servings": -2, "calories": "about a lot", "prepTime": true });
        let recipe = normalize_recipe(&raw, 0);
        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.calories, 300);
        assert_eq!(recipe.prep_time, 15);
    }
}
