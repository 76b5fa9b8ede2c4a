//! Error types for iob2.

use thiserror::Error;

/// Result type for iob2 operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for iob2 operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Encoder configuration is invalid (bad label list, unknown entity class).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Span annotation failed geometry/overlap validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Recovered spans diverged from the original annotation.
    #[error("Alignment error: {0}")]
    Alignment(String),

    /// A label value in a sequence is outside the label vocabulary.
    #[error("Label value {value} at position {position} is not in the label vocabulary (size {vocab_size})")]
    LabelIndex {
        /// The offending label value.
        value: i32,
        /// Position in the label sequence.
        position: usize,
        /// Number of entries in the vocabulary.
        vocab_size: usize,
    },

    /// Raw annotation data could not be parsed into the expected shape.
    #[error("Schema error: {0}")]
    Schema(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Create an alignment error.
    pub fn alignment(msg: impl Into<String>) -> Self {
        Error::Alignment(msg.into())
    }

    /// Create a schema error.
    pub fn schema(msg: impl Into<String>) -> Self {
        Error::Schema(msg.into())
    }
}
