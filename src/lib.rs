//! # Sentinel
//!
//! A semantic-cache gateway that sits between client applications and one or more
//! LLM backends: it serves semantically equivalent past answers from a
//! vector-indexed cache, enforces per-user token budgets, and hardens upstream calls
//! with retries, timeouts, and a fallback model.
//!
//! ```text
//! Request → limit check → extract → embed → cache lookup → {judge?} → hit
//!                                                           └→ miss → provider → background save
//! ```
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use sentinel::Config;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! println!("Listening on {}", config.socket_addr());
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature flags
//!
//! | Feature | Purpose |
//! |---------|---------|
//! | `mock` | In-memory/scripted backends for tests and examples |
//!
//! ## Modules
//!
//! - [`orchestrator`] - top-level request state machine
//! - [`cache`] - two-tier semantic cache lookup
//! - [`provider`] - resilient, retrying generation
//! - [`embedding`], [`evaluator`], [`extractor`], [`limiter`], [`vectorstore`] - capability ports
//! - [`background`] - fire-and-forget write-through
//! - [`config`] - environment-backed configuration
//! - [`server`] - HTTP delivery surface
//!
//! Links: repo/issues at the crate `repository` URL.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod background;
pub mod cache;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod error;
pub mod evaluator;
pub mod extractor;
pub mod limiter;
pub mod model;
pub mod orchestrator;
pub mod provider;
pub mod server;
pub mod vectorstore;

pub use background::BackgroundWriter;
pub use cache::CacheLookup;
pub use config::{Config, ConfigError};
pub use constants::{DimensionMismatch, validate_embedding_dim};
pub use embedding::{Embedder, EmbeddingError, GenAiEmbedder};
pub use error::SentinelError;
pub use evaluator::{Evaluator, GenAiEvaluator};
pub use extractor::{Extractor, GenAiExtractor};
pub use limiter::{LimiterError, RedisLimiter, TokenLimiter};
pub use model::{CacheEntry, Request, Response, SearchHit};
pub use orchestrator::Orchestrator;
pub use provider::{AIProvider, GenAiProvider, ProviderError, ResilientProvider};
pub use vectorstore::{QdrantVectorStore, SearchFilter, VectorStore, VectorStoreError};

#[cfg(any(test, feature = "mock"))]
pub use embedding::StubEmbedder;
#[cfg(any(test, feature = "mock"))]
pub use evaluator::{AlwaysMatch, NeverMatch, ScriptedEvaluator};
#[cfg(any(test, feature = "mock"))]
pub use extractor::{EmptyExtractor, ScriptedExtractor};
#[cfg(any(test, feature = "mock"))]
pub use limiter::InMemoryLimiter;
#[cfg(any(test, feature = "mock"))]
pub use provider::ScriptedProvider;
#[cfg(any(test, feature = "mock"))]
pub use vectorstore::InMemoryVectorStore;
