use thiserror::Error;

#[derive(Debug, Error)]
pub enum LimiterError {
    #[error("limiter transport error: {0}")]
    Transport(String),
}
