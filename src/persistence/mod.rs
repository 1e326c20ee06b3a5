//! Local persistence and database migrations.
//!
//! Tangocho keeps its vocabulary collection in a local `SQLite` database. The
//! schema is managed with Diesel migrations so the database can be created
//! and upgraded consistently across machines.

mod error;
mod migrator;
mod vocabulary_store;

pub use error::PersistenceError;
pub use migrator::{CURRENT_SCHEMA_VERSION, SchemaVersion, migrate_database};
pub use vocabulary_store::{SqliteVocabularyGateway, VocabularyStore};
