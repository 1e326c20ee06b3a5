//! Durable record of which entries the user selected.
//!
//! The [`SelectionStore`] is owned by the application model and lent to the
//! table view and the study session, so both views always agree on what is
//! selected. Its JSON image is written through a [`SelectionPersistence`]
//! backend after every mutation.

mod persistence;
mod store;

pub use persistence::{
    InMemorySelection, JsonFileSelection, SelectionError, SelectionPersistence,
    default_selection_path,
};
pub use store::SelectionStore;
