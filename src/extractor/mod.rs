//! `Extractor` capability port: derives scoping fields from free-text prompts.

pub mod genai_client;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use genai_client::GenAiExtractor;

#[cfg(any(test, feature = "mock"))]
pub use mock::{EmptyExtractor, ScriptedExtractor};

use std::collections::HashMap;

use async_trait::async_trait;

/// Derives `{action, source, target}`-shaped scoping metadata from a prompt. Never
/// surfaces a transport error — any internal failure collapses to an empty mapping.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract_metadata(&self, prompt: &str) -> HashMap<String, String>;
}
