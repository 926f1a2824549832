use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum ProviderError {
    #[error("{0}")]
    Upstream(String),

    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("primary failed ({primary}), fallback failed ({fallback})")]
    BothFailed { primary: String, fallback: String },
}

impl ProviderError {
    /// An error is retryable iff its lowercase message contains any of the markers in
    /// [`crate::constants::RETRYABLE_ERROR_MARKERS`].
    pub fn is_retryable(&self) -> bool {
        let message = self.to_string().to_lowercase();
        crate::constants::RETRYABLE_ERROR_MARKERS
            .iter()
            .any(|marker| message.contains(marker))
    }
}
