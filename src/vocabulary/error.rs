//! Error types exposed by the vocabulary backend collaborator.

use thiserror::Error;

/// Errors surfaced while fetching, mutating, or importing entries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The backend could not be reached or failed to answer.
    #[error("backend unavailable: {message}")]
    Unavailable {
        /// Error detail from the storage engine.
        message: String,
    },

    /// A query or write was rejected by the storage engine.
    #[error("backend query failed: {message}")]
    Query {
        /// Error detail from the storage engine.
        message: String,
    },

    /// The referenced entry does not exist.
    #[error("vocabulary entry {id} not found")]
    EntryNotFound {
        /// Identity that was not found.
        id: i64,
    },

    /// The import payload was empty.
    #[error("Please paste some tab-separated data.")]
    EmptyImport,

    /// A row of the import payload could not be parsed.
    #[error("line {line}: {message}")]
    InvalidImport {
        /// One-based line number within the payload.
        line: usize,
        /// What was wrong with the row.
        message: String,
    },
}
