use crate::providers::traits::{CompletionContext, CompletionRequest};

pub const CHEF_SYSTEM_PROMPT: &str = "You are Wasfah, a friendly home-cooking assistant. \
You suggest practical recipes that make the most of the ingredients people already have. \
When asked for structured data you answer with JSON only.";

pub const RECIPE_SEARCH_REQUEST: &str = "recipe_search";
pub const JSON_RESPONSE_FORMAT: &str = "json";

pub fn recipe_search_prompt(ingredients: &[String], count: usize) -> String {
    format!(
        "Create {count} different recipes that use these ingredients: {ingredients}.\n\
         You may add common pantry staples (salt, pepper, oil, water, spices).\n\
         Respond ONLY with a JSON array of {count} objects, no prose, using this schema:\n\
         [\n  {{\n    \"title\": \"string\",\n    \"description\": \"string\",\n    \
         \"prepTime\": number (minutes),\n    \"cookTime\": number (minutes),\n    \
         \"servings\": number,\n    \"difficulty\": \"Easy\" | \"Medium\" | \"Hard\",\n    \
         \"calories\": number (per serving),\n    \"cuisineType\": \"string\",\n    \
         \"ingredients\": [{{ \"name\": \"string\", \"amount\": \"string\", \"unit\": \"string\" }}],\n    \
         \"instructions\": [\"string\"],\n    \"tags\": [\"string\"],\n    \
         \"nutrition\": {{ \"protein\": number, \"carbs\": number, \"fat\": number }}\n  }}\n]\n\
         When a step needs a timer, end it with the minutes in brackets, for example \"Simmer the sauce [10m]\".",
        count = count,
        ingredients = ingredients.join(", "),
    )
}

pub fn recipe_search_request(ingredients: &[String], count: usize) -> CompletionRequest {
    CompletionRequest {
        query: recipe_search_prompt(ingredients, count),
        context: CompletionContext {
            selected_ingredients: ingredients.to_vec(),
            request_type: RECIPE_SEARCH_REQUEST.to_string(),
            response_format: JSON_RESPONSE_FORMAT.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_ingredients_and_count() {
        let prompt = recipe_search_prompt(&["lamb".to_string(), "yogurt".to_string()], 3);
        assert!(prompt.starts_with("Create 3 different recipes that use these ingredients: lamb, yogurt."));
        assert!(prompt.contains("JSON array of 3 objects"));
        assert!(prompt.contains("\"cuisineType\""));
        assert!(prompt.contains("[10m]"));
    }

    #[test]
    fn test_request_context() {
        let request = recipe_search_request(&["okra".to_string()], 4);
        assert_eq!(request.context.selected_ingredients, vec!["okra"]);
        assert_eq!(request.context.request_type, "recipe_search");
        assert_eq!(request.context.response_format, "json");
    }
}
