use std::collections::HashMap;

use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatRequest};
use tracing::warn;

use super::Extractor;

const EXTRACTOR_INSTRUCTION: &str = "Extract key entities from the user's prompt as a flat \
JSON object. Focus on the keys 'action', 'source', and 'target' when they are present in \
the prompt. If a key cannot be found, omit it entirely — never use null or an empty \
string. Respond with a JSON object and nothing else. Example: {\"action\": \"translate\", \
\"source\": \"english\", \"target\": \"french\"}";

/// [`Extractor`] backed by a constrained `genai` chat call whose output is parsed as a
/// flat `string -> string` JSON object.
pub struct GenAiExtractor {
    client: Client,
    model: String,
}

impl GenAiExtractor {
    pub fn new(client: Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl Extractor for GenAiExtractor {
    async fn extract_metadata(&self, prompt: &str) -> HashMap<String, String> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(EXTRACTOR_INSTRUCTION),
            ChatMessage::user(prompt),
        ]);

        let response = match self.client.exec_chat(&self.model, request, None).await {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "extractor transport error, continuing with empty metadata");
                return HashMap::new();
            }
        };

        let Some(text) = response.first_text() else {
            return HashMap::new();
        };

        serde_json::from_str::<HashMap<String, String>>(text).unwrap_or_else(|e| {
            warn!(error = %e, "extractor returned unparseable JSON, continuing with empty metadata");
            HashMap::new()
        })
    }
}
