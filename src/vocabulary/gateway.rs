//! Gateway to the backend that owns the vocabulary collection.
//!
//! The trait-based design lets the table view and study session run against
//! the `SQLite` store in production and against mocks in tests.

use async_trait::async_trait;

use super::error::GatewayError;
use super::models::{Entry, FlagValue, ImportSummary};

/// Backend collaborator answering fetch, flag, and import requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VocabularyGateway: Send + Sync {
    /// Returns the full current entry collection.
    async fn fetch_entries(&self) -> Result<Vec<Entry>, GatewayError>;

    /// Persists a flag value for one entry.
    async fn set_flag(&self, id: i64, value: FlagValue) -> Result<(), GatewayError>;

    /// Bulk-creates entries from tab-separated rows.
    ///
    /// Either every row is inserted or none is.
    async fn import_entries(&self, tsv: &str) -> Result<ImportSummary, GatewayError>;
}
