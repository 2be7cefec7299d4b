pub mod deepseek;
pub mod openai;
pub mod openrouter;
pub mod traits;
pub mod utils;

#[cfg(test)]
pub mod scripted;

use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::env;

use crate::providers::deepseek::deepseek::DeepSeekProvider;
use crate::providers::openai::openai::OpenAIProvider;
use crate::providers::openrouter::openrouter::OpenRouterProvider;
use crate::providers::traits::CompletionProvider;

pub const PROVIDER_NAMES: [&str; 3] = ["deepseek", "openai", "openrouter"];

/// Builds the named provider.
pub async fn create_provider(
    name: &str,
    api_key: String,
    system_prompt: String,
) -> Result<Box<dyn CompletionProvider + Send + Sync>> {
    let provider: Box<dyn CompletionProvider + Send + Sync> = match name.to_lowercase().as_str() {
        "deepseek" => Box::new(DeepSeekProvider::new(api_key, system_prompt).await
            .map_err(|e| anyhow!("Failed to initialize DeepSeek provider: {}", e))?),
        "openai" => Box::new(OpenAIProvider::new(api_key, system_prompt).await
            .map_err(|e| anyhow!("Failed to initialize OpenAI provider: {}", e))?),
        "openrouter" => Box::new(OpenRouterProvider::new(api_key, system_prompt).await
            .map_err(|e| anyhow!("Failed to initialize OpenRouter provider: {}", e))?),
        other => return Err(anyhow!(
            "Unknown provider: {}. Available providers: {}",
            other,
            PROVIDER_NAMES.join(", ")
        )),
    };
    Ok(provider)
}

/// Reads `{PROVIDER}_API_KEY` for every known provider.
pub fn provider_keys_from_env() -> HashMap<String, String> {
    let mut provider_keys = HashMap::new();
    for provider_name in PROVIDER_NAMES {
        let key_var = format!("{}_API_KEY", provider_name.to_uppercase());
        if let Ok(api_key) = env::var(&key_var) {
            provider_keys.insert(provider_name.to_string(), api_key);
        }
    }
    provider_keys
}
