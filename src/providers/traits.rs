use async_trait::async_trait;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Extra information sent alongside a prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionContext {
    pub selected_ingredients: Vec<String>,
    pub request_type: String,
    pub response_format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub query: String,
    pub context: CompletionContext,
}

impl CompletionRequest {
    /// Folds the context into a single user message.
    pub fn to_prompt(&self) -> Result<String> {
        let context = serde_json::to_string_pretty(&self.context)?;
        Ok(format!("{}\n\nContext:\n{}", self.query, context))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub response: String,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn new(api_key: String, system_message: String) -> Result<Self>
    where
        Self: Sized;

    async fn complete(&self, prompt: &str) -> Result<String>;

    async fn complete_with_context(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        let prompt = request.to_prompt()?;
        let response = self.complete(&prompt).await?;
        Ok(CompletionResponse { response })
    }

    async fn get_model_info(&self) -> Result<String>;

    fn name(&self) -> &'static str;

    fn get_system_message(&self) -> String;

    fn get_api_key(&self) -> &String;

    fn clone_box(&self) -> Box<dyn CompletionProvider + Send + Sync>;
}

impl Clone for Box<dyn CompletionProvider + Send + Sync> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
