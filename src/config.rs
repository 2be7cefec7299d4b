use std::env;

pub const DEFAULT_RECIPE_COUNT: usize = 4;
pub const DEFAULT_DB_PATH: &str = "data/wasfah.db";

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub models: Vec<String>,
    pub api_url: String,
    pub temperature: f32,
}

impl ProviderConfig {
    pub fn from_env(provider: &str) -> Self {
        let prefix = provider.to_uppercase();

        let models = env::var(format!("{}_MODELS", prefix))
            .map(|m| {
                m.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| match provider {
                "deepseek" => vec!["deepseek-chat".to_string()],
                "openrouter" => vec![
                    "anthropic/claude-3-haiku".to_string(),
                    "mistralai/mistral-small".to_string(),
                ],
                "openai" => vec![
                    "gpt-4o-mini".to_string(),
                    "gpt-3.5-turbo".to_string(),
                ],
                _ => vec![]
            });

        let api_url = env::var(format!("{}_API_URL", prefix))
            .unwrap_or_else(|_| match provider {
                "deepseek" => "https://api.deepseek.com/v1/chat/completions".to_string(),
                "openrouter" => "https://openrouter.ai/api/v1/chat/completions".to_string(),
                "openai" => "https://api.openai.com/v1/chat/completions".to_string(),
                _ => String::new()
            });

        let temperature = env::var(format!("{}_TEMPERATURE", prefix))
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(0.7);

        Self {
            models,
            api_url,
            temperature,
        }
    }
}

/// Settings for the recipe search and the local store.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub recipe_count: usize,
    pub db_path: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            recipe_count: DEFAULT_RECIPE_COUNT,
            db_path: DEFAULT_DB_PATH.to_string(),
        }
    }
}

impl SearchConfig {
    pub fn from_env() -> Self {
        // The prompt asks for a small batch; anything outside 3..=4 is ignored.
        let recipe_count = env::var("WASFAH_RECIPE_COUNT")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|n| (3..=4).contains(n))
            .unwrap_or(DEFAULT_RECIPE_COUNT);

        let db_path = env::var("WASFAH_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());

        Self {
            recipe_count,
            db_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider_has_no_defaults() {
        let config = ProviderConfig::from_env("nonexistent-provider");
        assert!(config.models.is_empty());
        assert!(config.api_url.is_empty());
        assert_eq!(config.temperature, 0.7);
    }

    #[test]
    fn test_search_config_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.recipe_count, 4);
        assert_eq!(config.db_path, "data/wasfah.db");
    }
}
