//! Fixed-answer [`Extractor`] fakes.

use std::collections::HashMap;

use async_trait::async_trait;

use super::Extractor;

/// Always returns an empty mapping.
#[derive(Default)]
pub struct EmptyExtractor;

#[async_trait]
impl Extractor for EmptyExtractor {
    async fn extract_metadata(&self, _prompt: &str) -> HashMap<String, String> {
        HashMap::new()
    }
}

/// Returns a fixed mapping regardless of input.
pub struct ScriptedExtractor {
    metadata: HashMap<String, String>,
}

impl ScriptedExtractor {
    pub fn new(metadata: HashMap<String, String>) -> Self {
        Self { metadata }
    }
}

#[async_trait]
impl Extractor for ScriptedExtractor {
    async fn extract_metadata(&self, _prompt: &str) -> HashMap<String, String> {
        self.metadata.clone()
    }
}
