//! `AIProvider` capability port and the [`resilient::ResilientProvider`] that wraps
//! two of them behind a single bounded-latency interface.

mod error;
pub mod genai_client;
pub mod resilient;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::ProviderError;
pub use genai_client::GenAiProvider;
pub use resilient::ResilientProvider;

#[cfg(any(test, feature = "mock"))]
pub use mock::ScriptedProvider;

use async_trait::async_trait;

use crate::model::Response;

/// A single generative backend. [`ResilientProvider`] composes two of these —
/// `primary` and `fallback` — into one retrying, bounded-latency `AIProvider`.
#[async_trait]
pub trait AIProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Response, ProviderError>;
}
