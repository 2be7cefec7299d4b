use chrono::Utc;
use uuid::Uuid;

use super::model::{Difficulty, Nutrition, Recipe, RecipeIngredient};
use super::normalize::{AI_GENERATED_TAG, DEFAULT_COOK_TIME, DEFAULT_CUISINE, DEFAULT_PREP_TIME, DEFAULT_SERVINGS};

pub const FALLBACK_TAG: &str = "Fallback";
const FALLBACK_CALORIES: u32 = 350;

/// Deterministic recipe used when the model reply cannot be read.
pub fn fallback_recipe(ingredients: &[String]) -> Recipe {
    let joined = ingredients.join(" & ");
    let listed = ingredients.join(", ");

    Recipe {
        id: Uuid::new_v4().to_string(),
        title: format!("Creative Recipe with {}", joined),
        description: format!(
            "A simple home-style dish that brings together {}. Adjust the seasoning to taste.",
            listed
        ),
        prep_time: DEFAULT_PREP_TIME,
        cook_time: DEFAULT_COOK_TIME,
        servings: DEFAULT_SERVINGS,
        difficulty: Difficulty::Medium,
        calories: FALLBACK_CALORIES,
        cuisine_type: DEFAULT_CUISINE.to_string(),
        ingredients: ingredients
            .iter()
            .map(|name| RecipeIngredient {
                name: name.clone(),
                amount: "1".to_string(),
                unit: "portion".to_string(),
            })
            .collect(),
        instructions: vec![
            format!("Wash and prepare all ingredients: {}.", listed),
            "Cut everything into even, bite-sized pieces.".to_string(),
            "Heat a tablespoon of oil in a large pan over medium heat [2m].".to_string(),
            "Add the ingredients, starting with those that take longest to cook.".to_string(),
            "Season with salt, pepper and your favourite spices, then cook until tender [15m].".to_string(),
            "Taste, adjust the seasoning and serve hot.".to_string(),
        ],
        tags: vec![AI_GENERATED_TAG.to_string(), FALLBACK_TAG.to_string()],
        nutrition: Some(Nutrition {
            protein: 20.0,
            carbs: 35.0,
            fat: 12.0,
        }),
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_ingredients_follow_input_order() {
        let recipe = fallback_recipe(&["chicken".to_string(), "rice".to_string()]);
        assert_eq!(recipe.title, "Creative Recipe with chicken & rice");
        assert_eq!(recipe.ingredient_names(), vec!["chicken", "rice"]);
        assert_eq!(recipe.instructions.len(), 6);
        assert!(recipe.instructions[0].contains("chicken, rice"));
        assert_eq!(recipe.tags, vec!["AI Generated", "Fallback"]);
        assert_eq!(recipe.calories, 350);
    }

    #[test]
    fn test_single_ingredient() {
        let recipe = fallback_recipe(&["eggplant".to_string()]);
        assert_eq!(recipe.title, "Creative Recipe with eggplant");
    }
}
