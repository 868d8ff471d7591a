//! Error types for the core crate.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core game operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Raw input did not match any option.
    #[error("invalid choice: {input}")]
    InvalidChoice {
        /// The input as typed.
        input: String,
        /// The closest option label, if any was close enough.
        suggestion: Option<String>,
    },

    /// A prompt was given no options to choose from.
    #[error("no options to choose from")]
    NoOptions,

    /// The input source ended before a choice was made.
    #[error("input closed")]
    InputClosed,

    /// Reading input or writing output failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
