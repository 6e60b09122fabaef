//! Error types for tree number parsing.

use thiserror::Error;

/// Errors that can occur during tree number parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeNumberError {
    /// Parse error at a specific position in the input.
    #[error("parse error at position {position}: {message}")]
    ParseError {
        /// Position in the input where the error occurred.
        position: usize,
        /// Description of the error.
        message: String,
    },

    /// Empty input provided.
    #[error("empty tree number")]
    EmptyTreeNumber,
}

/// Result type for tree number operations.
pub type TreeNumberResult<T> = std::result::Result<T, TreeNumberError>;
