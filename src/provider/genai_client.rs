use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatRequest};

use super::error::ProviderError;
use super::AIProvider;
use crate::model::Response;

/// [`AIProvider`] backed by a single `genai` model. Two instances of this (primary and
/// fallback) are what [`super::ResilientProvider`] wraps.
pub struct GenAiProvider {
    client: Client,
    model: String,
}

impl GenAiProvider {
    pub fn new(client: Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl AIProvider for GenAiProvider {
    async fn generate(&self, prompt: &str) -> Result<Response, ProviderError> {
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);

        let started = std::time::Instant::now();
        let chat_response = self
            .client
            .exec_chat(&self.model, request, None)
            .await
            .map_err(|e| ProviderError::Upstream(e.to_string()))?;

        let content = chat_response
            .first_text()
            .map(|s| s.to_string())
            .unwrap_or_default();

        let token_count = chat_response
            .usage
            .total_tokens
            .unwrap_or(0)
            .max(0) as u32;

        Ok(Response {
            content,
            cached: false,
            score: 0.0,
            model: self.model.clone(),
            token_count,
            cost: 0.0,
            latency_ms: started.elapsed().as_millis() as u64,
            metadata: Default::default(),
        })
    }
}
