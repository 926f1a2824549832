//! Scripted [`AIProvider`] fakes for exercising [`super::ResilientProvider`].

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::error::ProviderError;
use super::AIProvider;
use crate::model::Response;

enum Script {
    Succeed(String),
    Fail(String),
}

/// A provider that always does the same thing and counts how many times it was called.
pub struct ScriptedProvider {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn succeeding(content: impl Into<String>) -> Self {
        Self {
            script: Script::Succeed(content.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            script: Script::Fail(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AIProvider for ScriptedProvider {
    async fn generate(&self, _prompt: &str) -> Result<Response, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Succeed(content) => Ok(Response {
                content: content.clone(),
                cached: false,
                score: 0.0,
                model: "scripted".to_string(),
                token_count: 10,
                cost: 0.0,
                latency_ms: 0,
                metadata: Default::default(),
            }),
            Script::Fail(message) => Err(ProviderError::Upstream(message.clone())),
        }
    }
}
