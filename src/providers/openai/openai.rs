use async_trait::async_trait;
use anyhow::{Result, anyhow};
use crate::config::ProviderConfig;
use crate::providers::traits::CompletionProvider;
use async_openai::{
    types::{
        CreateChatCompletionRequestArgs,
        ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage,
        ChatCompletionRequestUserMessageContent,
        Role,
    },
    Client,
    config::OpenAIConfig,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct OpenAIProvider {
    api_key: String,
    system_message: Arc<String>,
    client: Client<OpenAIConfig>,
    chat_model: String,
    temperature: f32,
}

#[async_trait]
impl CompletionProvider for OpenAIProvider {
    async fn new(api_key: String, system_message: String) -> Result<Self> {
        let config = OpenAIConfig::new().with_api_key(api_key.clone());
        let client = Client::with_config(config);

        let provider_config = ProviderConfig::from_env("openai");
        let chat_model = provider_config
            .models
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("No OpenAI model configured"))?;

        Ok(Self {
            api_key,
            system_message: Arc::new(system_message),
            client,
            chat_model,
            temperature: provider_config.temperature,
        })
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.chat_model)
            .temperature(self.temperature)
            .messages(vec![
                ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage {
                        role: Role::System,
                        content: self.system_message.as_ref().clone(),
                        name: None,
                    }
                ),
                ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage {
                        role: Role::User,
                        content: ChatCompletionRequestUserMessageContent::Text(prompt.to_string()),
                        name: None,
                    }
                ),
            ])
            .build()?;

        let response = self.client.chat().create(request).await?;

        response.choices.first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow!("No response content"))
    }

    async fn get_model_info(&self) -> Result<String> {
        Ok(self.chat_model.clone())
    }

    fn name(&self) -> &'static str {
        "OpenAI"
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
