//! Error types for MeSH enrichment.
//!
//! Row-level failures (the first group below) blank one output row and let
//! the run continue; the file-level ones abort it. Transport errors are
//! carried as strings so test doubles can construct every variant.

use thiserror::Error;

/// Errors that can occur during enrichment.
#[derive(Error, Debug)]
pub enum EnrichError {
    /// Identifier has no record at the remote service (HTTP 404).
    #[error("MeSH ID not found: {0}")]
    NotFound(String),

    /// Remote service replied with an unexpected status.
    #[error("API error (status {status}): {id}")]
    ApiStatus {
        /// HTTP status code of the reply.
        status: u16,
        /// The bare identifier code being fetched.
        id: String,
    },

    /// Record fetch timed out.
    #[error("Timeout querying API for: {0}")]
    Timeout(String),

    /// Transport-level failure talking to the remote service.
    #[error("Network error for {id}: {message}")]
    Network {
        /// The bare identifier code being fetched.
        id: String,
        /// Stringified transport error.
        message: String,
    },

    /// Record payload carried no usable label.
    #[error("No label found for: {0}")]
    NoLabel(String),

    /// Record payload could not be decoded as JSON.
    #[error("Malformed record for {id}: {message}")]
    MalformedRecord {
        /// The bare identifier code being fetched.
        id: String,
        /// Decoder error description.
        message: String,
    },

    /// Structured descriptor label query failed.
    #[error("Label query failed for {tree}: {message}")]
    LabelQuery {
        /// The tree position being looked up.
        tree: String,
        /// Failure description.
        message: String,
    },

    /// HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    ClientInit(String),

    /// Input has no identifier column in its header.
    #[error("Input has no '{0}' column")]
    MissingColumn(String),

    /// CSV-level read or write failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O failure on input or output files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for enrichment operations.
pub type EnrichResult<T> = std::result::Result<T, EnrichError>;
