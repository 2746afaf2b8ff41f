//! Error types for introscore
//!
//! Errors are split by severity:
//! - `RubricError` is fatal and raised at rubric load time, before any
//!   scoring happens.
//! - `SemanticError` and `EnrichmentError` are per-branch soft errors:
//!   the engine maps them to documented fallback values and records the
//!   reason, they never abort a scoring request.

use thiserror::Error;

/// Rubric configuration error (fatal, load-time)
#[derive(Debug, Error)]
pub enum RubricError {
    /// IO error reading a rubric file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Rubric document failed to parse
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Rubric has no criteria at all
    #[error("Rubric has no criteria")]
    Empty,

    /// Criterion weights must sum to 1.0
    #[error("Criterion weights sum to {0}, expected 1.0")]
    WeightSum(f64),

    /// Criterion weight outside (0, 1]
    #[error("Criterion '{0}' has weight outside (0, 1]")]
    InvalidWeight(String),

    /// Declared criterion max does not match the sum of its metric maxima
    #[error("Criterion '{criterion}' declares max {declared} but its metrics total {actual}")]
    MaxScoreMismatch {
        criterion: String,
        declared: f64,
        actual: f64,
    },

    /// Band rows must be ordered by lower bound
    #[error("Band table for '{metric}' is not sorted by lower bound")]
    UnsortedBands { metric: String },

    /// Band row with min > max
    #[error("Band '{level}' for '{metric}' has min {min} > max {max}")]
    InvertedBand {
        metric: String,
        level: String,
        min: f64,
        max: f64,
    },

    /// Band rows overlap beyond a shared boundary
    #[error("Band table for '{metric}' has overlapping rows ('{lower}' and '{upper}')")]
    OverlappingBands {
        metric: String,
        lower: String,
        upper: String,
    },
}

/// Semantic analysis error (per-branch, mapped to neutral fallbacks)
#[derive(Debug, Error)]
pub enum SemanticError {
    /// Embedding model failed
    #[error("Embedding model error: {0}")]
    Model(String),

    /// Embedder returned the wrong number of vectors
    #[error("Embedder returned {got} vectors for {expected} sentences")]
    ShapeMismatch { expected: usize, got: usize },

    /// No embedder was injected into the engine
    #[error("Embedder not configured")]
    NotConfigured,
}

/// Remote enrichment error (per-call, mapped to neutral fallbacks)
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// Network communication error
    #[error("Network error: {0}")]
    Network(String),

    /// Provider returned an error response
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Failed to parse provider response
    #[error("Parse error: {0}")]
    Parse(String),

    /// Call exceeded its timeout budget
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),
}
