//! Environment configuration.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;

use crate::constants::DEFAULT_EMBEDDING_DIM;

/// Runtime configuration, loaded once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bind_addr: IpAddr,

    /// Vector-store connection.
    pub qdrant_url: String,
    pub qdrant_collection: String,

    /// Token-limiter connection (`usage:<user_id>` counters).
    pub limiter_url: String,
    pub per_user_token_cap: u64,

    /// Model backend project/location, used by the `genai` client to resolve credentials.
    pub model_project: String,
    pub model_location: String,

    pub primary_model: String,
    pub fallback_model: String,
    pub embedding_model: String,
    pub extractor_model: String,
    pub evaluator_model: String,

    pub embedding_dim: usize,
}

pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";
pub const DEFAULT_QDRANT_COLLECTION: &str = "sentinel_cache";
pub const DEFAULT_LIMITER_URL: &str = "redis://127.0.0.1:6379";

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            qdrant_collection: DEFAULT_QDRANT_COLLECTION.to_string(),
            limiter_url: DEFAULT_LIMITER_URL.to_string(),
            per_user_token_cap: 10_000,
            model_project: String::new(),
            model_location: "us-central1".to_string(),
            primary_model: "gemini-2.5-flash".to_string(),
            fallback_model: "gemini-1.5-flash".to_string(),
            embedding_model: "text-embedding-004".to_string(),
            extractor_model: "gemini-3-flash".to_string(),
            evaluator_model: "gemini-2.5-flash".to_string(),
            embedding_dim: DEFAULT_EMBEDDING_DIM,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "SENTINEL_PORT";
    const ENV_BIND_ADDR: &'static str = "SENTINEL_BIND_ADDR";
    const ENV_QDRANT_URL: &'static str = "SENTINEL_QDRANT_URL";
    const ENV_QDRANT_COLLECTION: &'static str = "SENTINEL_QDRANT_COLLECTION";
    const ENV_LIMITER_URL: &'static str = "SENTINEL_LIMITER_URL";
    const ENV_TOKEN_CAP: &'static str = "SENTINEL_TOKEN_CAP";
    const ENV_MODEL_PROJECT: &'static str = "SENTINEL_MODEL_PROJECT";
    const ENV_MODEL_LOCATION: &'static str = "SENTINEL_MODEL_LOCATION";
    const ENV_PRIMARY_MODEL: &'static str = "SENTINEL_PRIMARY_MODEL";
    const ENV_FALLBACK_MODEL: &'static str = "SENTINEL_FALLBACK_MODEL";
    const ENV_EMBEDDING_MODEL: &'static str = "SENTINEL_EMBEDDING_MODEL";
    const ENV_EXTRACTOR_MODEL: &'static str = "SENTINEL_EXTRACTOR_MODEL";
    const ENV_EVALUATOR_MODEL: &'static str = "SENTINEL_EVALUATOR_MODEL";
    const ENV_EMBEDDING_DIM: &'static str = "SENTINEL_EMBEDDING_DIM";

    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let qdrant_url = Self::parse_string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url);
        let qdrant_collection =
            Self::parse_string_from_env(Self::ENV_QDRANT_COLLECTION, defaults.qdrant_collection);
        let limiter_url = Self::parse_string_from_env(Self::ENV_LIMITER_URL, defaults.limiter_url);
        let per_user_token_cap =
            Self::parse_u64_from_env(Self::ENV_TOKEN_CAP, defaults.per_user_token_cap);
        let model_project =
            Self::parse_string_from_env(Self::ENV_MODEL_PROJECT, defaults.model_project);
        let model_location =
            Self::parse_string_from_env(Self::ENV_MODEL_LOCATION, defaults.model_location);
        let primary_model =
            Self::parse_string_from_env(Self::ENV_PRIMARY_MODEL, defaults.primary_model);
        let fallback_model =
            Self::parse_string_from_env(Self::ENV_FALLBACK_MODEL, defaults.fallback_model);
        let embedding_model =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_MODEL, defaults.embedding_model);
        let extractor_model =
            Self::parse_string_from_env(Self::ENV_EXTRACTOR_MODEL, defaults.extractor_model);
        let evaluator_model =
            Self::parse_string_from_env(Self::ENV_EVALUATOR_MODEL, defaults.evaluator_model);
        let embedding_dim =
            Self::parse_usize_from_env(Self::ENV_EMBEDDING_DIM, defaults.embedding_dim);

        Ok(Self {
            port,
            bind_addr,
            qdrant_url,
            qdrant_collection,
            limiter_url,
            per_user_token_cap,
            model_project,
            model_location,
            primary_model,
            fallback_model,
            embedding_model,
            extractor_model,
            evaluator_model,
            embedding_dim,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.embedding_dim == 0 {
            return Err(ConfigError::InvalidEmbeddingDim {
                value: self.embedding_dim,
            });
        }
        if self.qdrant_collection.trim().is_empty() {
            return Err(ConfigError::MissingEnvVar {
                name: Self::ENV_QDRANT_COLLECTION,
            });
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_usize_from_env(var_name: &str, default: usize) -> usize {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}
