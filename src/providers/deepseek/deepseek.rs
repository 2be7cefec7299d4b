use async_trait::async_trait;
use anyhow::{Result, anyhow};
use crate::config::ProviderConfig;
use crate::providers::traits::CompletionProvider;
use crate::providers::utils::extract_chat_content;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Clone)]
pub struct DeepSeekProvider {
    api_key: String,
    system_message: Arc<String>,
    client: Client,
    model: String,
    api_url: String,
    temperature: f32,
}

#[async_trait]
impl CompletionProvider for DeepSeekProvider {
    async fn new(api_key: String, system_message: String) -> Result<Self> {
        let config = ProviderConfig::from_env("deepseek");
        let model = config
            .models
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("No DeepSeek model configured"))?;

        Ok(Self {
            api_key,
            system_message: Arc::new(system_message),
            client: Client::new(),
            model,
            api_url: config.api_url,
            temperature: config.temperature,
        })
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let response = self.client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&json!({
                "model": self.model,
                "messages": [
                    {
                        "role": "system",
                        "content": self.system_message.as_str()
                    },
                    {
                        "role": "user",
                        "content": prompt
                    }
                ],
                "temperature": self.temperature
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            return Err(anyhow!("API request failed: Status {}, Body: {}", status, error_text));
        }

        let response_json: Value = response.json().await?;

        if let Some(error) = response_json.get("error") {
            return Err(anyhow!("API returned error: {}", error));
        }

        extract_chat_content(&response_json).ok_or_else(|| {
            let debug_json = serde_json::to_string_pretty(&response_json).unwrap_or_default();
            anyhow!("Invalid response format. Response JSON: {}", debug_json)
        })
    }

    async fn get_model_info(&self) -> Result<String> {
        Ok(self.model.clone())
    }

    fn name(&self) -> &'static str {
        "DeepSeek"
    }

    fn get_system_message(&self) -> String {
        self.system_message.as_ref().clone()
    }

    fn get_api_key(&self) -> &String {
        &self.api_key
    }

    fn clone_box(&self) -> Box<dyn CompletionProvider + Send + Sync> {
        Box::new(self.clone())
    }
}
