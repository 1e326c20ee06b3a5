//! Tangocho library crate: a vocabulary table and flashcard study session.
//!
//! The library keeps a vocabulary collection in a local `SQLite` database and
//! presents it as a filterable, sortable, selectable table. Selected entries
//! can be studied as flashcards, where cards can be flipped, flagged, and
//! removed from the selection. The terminal interface lives in [`tui`].

pub mod config;
pub mod persistence;
pub mod selection;
pub mod study;
pub mod table;
pub mod telemetry;
pub mod tui;
pub mod vocabulary;

pub use config::{OperationMode, TangochoConfig};
pub use vocabulary::{Entry, GatewayError, VocabularyGateway};
