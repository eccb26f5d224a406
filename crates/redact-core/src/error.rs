use thiserror::Error;

/// Failures surfaced to the caller of the engine.
///
/// Variants carry lengths, offsets and identifiers only. Input text and
/// matched values never appear in an error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input too large: {length} chars exceeds limit of {max}")]
    InputTooLarge { length: usize, max: usize },

    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Invalid span {start}..{end} for text of length {len}")]
    InvalidSpan { start: usize, end: usize, len: usize },

    #[error("Invalid operator: {0}")]
    InvalidOperator(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
