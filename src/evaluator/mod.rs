//! `Evaluator` capability port: the LLM-as-judge used to disambiguate the cache's
//! ambiguity zone.

pub mod genai_client;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use genai_client::GenAiEvaluator;

#[cfg(any(test, feature = "mock"))]
pub use mock::{AlwaysMatch, NeverMatch, ScriptedEvaluator};

use async_trait::async_trait;

/// A boolean-returning "same intent?" judge. Never surfaces a transport error —
/// any internal failure collapses to `false`, biasing toward a fresh generation
/// rather than risking a wrong cached answer.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn is_match(&self, prompt_a: &str, prompt_b: &str) -> bool;
}
