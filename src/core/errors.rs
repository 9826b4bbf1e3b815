//! Shared error types for the scoring engine

use thiserror::Error;

/// Main error type for aptscore operations
///
/// Only structurally invalid input reaches this enum. Soft conditions
/// (missing norm rows, unresolvable answer keys, zero std-dev) degrade
/// to numeric results with a warning so a single bad respondent or
/// missing calibration never blocks a batch.
#[derive(Debug, Error)]
pub enum Error {
    /// Raw answer outside the Likert domain
    #[error("malformed answer for '{key}': {value} is outside the 1..=5 domain")]
    MalformedAnswer { key: String, value: u8 },

    /// Scoring or calibration requested against an empty question catalog
    #[error("question catalog is empty")]
    EmptyCatalog,

    /// Norm calibration requested with no sample respondents
    #[error("norm calibration requires at least one sample answer log")]
    EmptySample,

    /// Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
