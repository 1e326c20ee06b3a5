//! Error types for local persistence operations.

use thiserror::Error;

use crate::vocabulary::GatewayError;

/// Errors returned while initialising or migrating the local `SQLite` database.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersistenceError {
    /// No database URL/path was provided.
    #[error("database URL is required (use --database-url or TANGOCHO_DATABASE_URL)")]
    MissingDatabaseUrl,

    /// The database URL/path was present but blank.
    #[error("database URL must not be blank")]
    BlankDatabaseUrl,

    /// Establishing a `SQLite` connection failed.
    #[error("failed to connect to SQLite database: {message}")]
    ConnectionFailed {
        /// Error detail from Diesel.
        message: String,
    },

    /// Running pending migrations failed.
    #[error("failed to run database migrations: {message}")]
    MigrationFailed {
        /// Error detail from Diesel migrations.
        message: String,
    },

    /// Reading the schema version from the migration table failed.
    #[error("failed to read schema version after migrations: {message}")]
    SchemaVersionQueryFailed {
        /// Error detail from Diesel query execution.
        message: String,
    },

    /// The migrations completed but no schema version could be found.
    #[error("no schema version recorded after migrations ran")]
    MissingSchemaVersion,

    /// The vocabulary table does not exist; migrations have not run.
    #[error("database schema is not initialised (run with --migrate-db)")]
    SchemaNotInitialised,

    /// A read query failed.
    #[error("vocabulary query failed: {message}")]
    QueryFailed {
        /// Error detail from Diesel.
        message: String,
    },

    /// An insert or update failed.
    #[error("vocabulary write failed: {message}")]
    WriteFailed {
        /// Error detail from Diesel.
        message: String,
    },
}

impl From<PersistenceError> for GatewayError {
    fn from(error: PersistenceError) -> Self {
        match error {
            PersistenceError::QueryFailed { message } | PersistenceError::WriteFailed { message } => {
                Self::Query { message }
            }
            other => Self::Unavailable {
                message: other.to_string(),
            },
        }
    }
}
