//! CLI operation mode handlers.
//!
//! This module contains the implementations for the operation modes:
//! - [`migrations`]: Database schema migrations
//! - [`import`]: Bulk TSV import into the vocabulary table
//! - [`study_tui`]: Interactive TUI for browsing and studying vocabulary
//!
//! Failures are reported through [`error::CliError`].

pub mod error;
pub mod import;
pub mod migrations;
pub mod study_tui;
