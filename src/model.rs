//! Request/response shapes exchanged between the HTTP surface and the [`crate::orchestrator`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// An inbound generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub user_id: String,
    pub prompt: String,

    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub model: String,

    #[serde(default)]
    pub metadata: HashMap<String, String>,

    #[serde(default)]
    pub temperature: f32,

    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl Request {
    pub fn is_valid(&self) -> bool {
        !self.user_id.trim().is_empty() && !self.prompt.trim().is_empty()
    }
}

/// The orchestrator's response to a [`Request`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub content: String,
    pub cached: bool,
    pub score: f32,
    pub model: String,
    pub token_count: u32,
    pub cost: f64,
    pub latency_ms: u64,

    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl Response {
    pub fn fallback_used(&self) -> bool {
        self.metadata
            .get("fallback_used")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// Logical shape of a vector-store record. Construction happens exclusively in
/// [`crate::background`] at the end of a successful cache-miss request.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub id: Uuid,
    pub vector: Vec<f32>,
    pub prompt: String,
    pub content: String,
    pub user_id: String,
    pub created_at: i64,
    pub extra: HashMap<String, String>,
}

/// A single candidate surfaced by [`crate::vectorstore::VectorStore::search`].
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub prompt: String,
    pub content: String,
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_requires_user_id_and_prompt() {
        let mut req = Request {
            user_id: "u1".into(),
            prompt: "hi".into(),
            provider: String::new(),
            model: String::new(),
            metadata: HashMap::new(),
            temperature: 0.0,
            timestamp: Utc::now(),
        };
        assert!(req.is_valid());

        req.user_id = "  ".into();
        assert!(!req.is_valid());

        req.user_id = "u1".into();
        req.prompt = "".into();
        assert!(!req.is_valid());
    }

    #[test]
    fn response_fallback_used_defaults_false() {
        let resp = Response {
            content: "hi".into(),
            cached: false,
            score: 0.0,
            model: "primary".into(),
            token_count: 0,
            cost: 0.0,
            latency_ms: 0,
            metadata: HashMap::new(),
        };
        assert!(!resp.fallback_used());
    }
}
