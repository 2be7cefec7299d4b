use async_trait::async_trait;
use anyhow::{Result, anyhow};
use crate::providers::traits::{CompletionProvider, CompletionRequest, CompletionResponse};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays canned replies in order and records every request it sees.
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    api_key: String,
    replies: Arc<Mutex<VecDeque<Result<String, String>>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedProvider {
    pub fn replying(replies: &[&str]) -> Self {
        let provider = Self::default();
        for reply in replies {
            provider.push_reply(reply);
        }
        provider
    }

    pub fn failing(message: &str) -> Self {
        let provider = Self::default();
        provider.replies.lock().unwrap().push_back(Err(message.to_string()));
        provider
    }

    pub fn push_reply(&self, reply: &str) {
        self.replies.lock().unwrap().push_back(Ok(reply.to_string()));
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn new(api_key: String, _system_message: String) -> Result<Self> {
        Ok(Self {
            api_key,
            ..Self::default()
        })
    }

    async fn complete(&self, _prompt: &str) -> Result<String> {
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Err(anyhow!("no scripted reply left")),
        }
    }

    async fn complete_with_context(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let response = self.complete(&request.query).await?;
        Ok(CompletionResponse { response })
    }

    async fn get_model_info(&self) -> Result<String> {
        Ok("scripted".to_string())
    }

    fn name(&self) -> &'static str {
        "Scripted"
    }

    fn get_system_message(&self) -> String {
        String::new()
    }

    fn get_api_key(&self) -> &String {
        &self.api_key
    }

    fn clone_box(&self) -> Box<dyn CompletionProvider + Send + Sync> {
        Box::new(self.clone())
    }
}
