use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatRequest};
use tracing::warn;

use super::Evaluator;

const JUDGE_INSTRUCTION: &str = "You are a Semantic Intent Judge. Given two prompts, \
determine whether they express the same underlying intent, accounting for paraphrase, \
word order, and synonyms. Respond with exactly one word: YES or NO.";

/// [`Evaluator`] backed by a constrained `genai` chat call.
pub struct GenAiEvaluator {
    client: Client,
    model: String,
}

impl GenAiEvaluator {
    pub fn new(client: Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl Evaluator for GenAiEvaluator {
    async fn is_match(&self, prompt_a: &str, prompt_b: &str) -> bool {
        let request = ChatRequest::new(vec![
            ChatMessage::system(JUDGE_INSTRUCTION),
            ChatMessage::user(format!("Prompt A: {prompt_a}\nPrompt B: {prompt_b}")),
        ]);

        let response = match self.client.exec_chat(&self.model, request, None).await {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "evaluator transport error, treating as no-match");
                return false;
            }
        };

        response
            .first_text()
            .map(|text| text.to_uppercase().contains("YES"))
            .unwrap_or(false)
    }
}
