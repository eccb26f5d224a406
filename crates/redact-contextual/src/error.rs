//! Error types for redact-contextual

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContextualError>;

/// Why the contextual recognizer produced no result.
///
/// Messages describe the failure only; they never echo the input text.
#[derive(Error, Debug)]
pub enum ContextualError {
    #[error("Contextual recognizer timed out")]
    Timeout,

    #[error("Contextual recognizer unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid response from contextual recognizer: {0}")]
    InvalidResponse(String),
}
