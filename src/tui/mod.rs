//! Terminal User Interface for browsing and studying vocabulary.
//!
//! This module provides an interactive TUI for filtering, sorting, and
//! selecting vocabulary entries and for running flashcard sessions over the
//! selection, using the bubbletea-rs framework.
//!
//! # Architecture
//!
//! The TUI follows the Model-View-Update (MVU) pattern:
//!
//! - **Model**: Application state in [`app::VocabularyApp`]
//! - **View**: Rendering logic in each component's `view()` method
//! - **Update**: Message-driven state transitions in `update()`
//!
//! # Modules
//!
//! - [`app`]: Main application model and entry point
//! - [`messages`]: Message types for the update loop
//! - [`state`]: Filter editor, debounce, and overlay cursor state
//! - [`components`]: Stateless table and flashcard renderers
//! - [`input`]: Key-to-message mapping for input handling
//!
//! # Startup Context
//!
//! Because bubbletea-rs's `Model` trait requires `init()` to be a static
//! function, the backend gateway, telemetry sink, and selection location are
//! parked with [`set_app_context`] before the program starts.
//! `VocabularyApp::init()` retrieves them and issues the first fetch.

pub mod app;
pub mod components;
pub mod input;
pub mod messages;
pub mod state;
mod storage;

pub use app::VocabularyApp;
pub use storage::{
    AppContext, DEFAULT_FEEDBACK_TTL, DEFAULT_FILTER_DEBOUNCE, TuiTimings, set_app_context,
};
