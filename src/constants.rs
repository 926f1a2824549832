//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants from primary ones to avoid drift.
//!
//! # Dimension Invariant
//!
//! The embedding dimension is a collection-level invariant: it is fixed when the
//! vector store collection is created and every subsequent insert or query vector
//! must match it exactly. [`validate_embedding_dim`] is the single point where that
//! invariant is enforced at runtime.

use std::time::Duration;

/// Dimensionality of vectors produced by the configured embedding model
/// (`text-embedding-004` produces 768-dimensional output).
pub const DEFAULT_EMBEDDING_DIM: usize = 768;

/// Lower bound of the similarity range the vector store is queried with. Below this,
/// a candidate is not a plausible match and is never returned by the store.
pub const AMBIGUITY_FLOOR: f32 = 0.75;

/// Similarity above which a candidate is accepted without consulting the judge.
pub const TIER1_AUTO_ACCEPT_THRESHOLD: f32 = 0.98;

/// Cache entries older than this are excluded from search results by filter.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

/// Number of retries attempted against the primary provider before falling back
/// (three attempts total: the initial try plus this many retries).
pub const PROVIDER_MAX_RETRIES: u32 = 2;

/// Base delay for the exponential backoff between primary attempts.
pub const PROVIDER_BASE_DELAY: Duration = Duration::from_millis(500);

/// Ceiling on wall time for a single `Generate` call, across all primary attempts
/// and the fallback attempt.
pub const PROVIDER_GLOBAL_TIMEOUT: Duration = Duration::from_secs(25);

/// Upper bound of the jitter fraction applied to each backoff sleep (`U[0, 0.2]`).
pub const PROVIDER_JITTER_FRACTION: f64 = 0.2;

/// Bounded internal deadline for the detached background write-through task.
pub const BACKGROUND_WRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// Substrings whose presence (case-insensitively) in an error message marks it retryable.
pub const RETRYABLE_ERROR_MARKERS: &[&str] = &["429", "500", "503", "overloaded", "deadline"];

/// Validates that a runtime embedding dimension matches the collection's configured
/// dimension.
///
/// Use this at the vector-store boundary to catch dimension mismatches before an
/// insert or search silently corrupts results.
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimensionMismatch> {
    if actual != expected {
        return Err(DimensionMismatch { expected, actual });
    }
    Ok(())
}

/// Returned when a vector's length disagrees with the collection's configured dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionMismatch {
    pub expected: usize,
    pub actual: usize,
}

impl std::fmt::Display for DimensionMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "dimension mismatch: expected {}, got {}",
            self.expected, self.actual
        )
    }
}

impl std::error::Error for DimensionMismatch {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_embedding_dim_match() {
        assert!(validate_embedding_dim(768, 768).is_ok());
    }

    #[test]
    fn validate_embedding_dim_mismatch() {
        assert_eq!(
            validate_embedding_dim(512, 768),
            Err(DimensionMismatch {
                expected: 768,
                actual: 512
            })
        );
    }

    #[test]
    fn tier_bounds_are_consistent_with_ambiguity_floor() {
        assert!(AMBIGUITY_FLOOR < TIER1_AUTO_ACCEPT_THRESHOLD);
    }

    #[test]
    fn retryable_markers_cover_spec_cases() {
        for marker in ["429", "500", "503", "overloaded", "deadline"] {
            assert!(RETRYABLE_ERROR_MARKERS.contains(&marker));
        }
    }
}
