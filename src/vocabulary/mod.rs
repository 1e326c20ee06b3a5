//! Vocabulary entries and the backend collaborator that owns them.
//!
//! This module defines the [`Entry`] model copied into the table and study
//! views, the [`VocabularyGateway`] trait used to fetch entries, persist flag
//! changes, and import TSV rows, and the errors those requests surface.

pub mod error;
pub mod gateway;
pub mod models;
pub mod tsv;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use error::GatewayError;
pub use gateway::VocabularyGateway;
pub use models::{Entry, FlagValue, ImportSummary, NewEntry};
pub use tsv::parse_tsv;

#[cfg(test)]
pub use gateway::MockVocabularyGateway;
