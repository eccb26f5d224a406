//! Error types for redact-patterns

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PatternError>;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    #[error("Unknown recognizer: {0}")]
    UnknownRecognizer(String),
}

impl From<PatternError> for redact_core::Error {
    fn from(err: PatternError) -> Self {
        match err {
            PatternError::UnknownLocale(locale) => redact_core::Error::InvalidLocale(locale),
            PatternError::UnknownRecognizer(_) => redact_core::Error::Config(err.to_string()),
        }
    }
}
