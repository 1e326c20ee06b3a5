//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.tangocho.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `TANGOCHO_DATABASE_URL`,
//!    `TANGOCHO_SELECTION_PATH`, ...
//! 4. **Command-line arguments** – `--database-url`, `--import-tsv`, ...
//!
//! # Configuration File
//!
//! ```toml
//! database_url = "tangocho.sqlite"
//! selection_path = "/home/me/.local/state/tangocho/selection.json"
//! filter_debounce_ms = 300
//! feedback_ttl_ms = 1500
//! ```

use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::persistence::PersistenceError;
use crate::selection::{SelectionError, default_selection_path};
use crate::tui::TuiTimings;

/// Default delay before integer filter input is applied, in milliseconds.
pub const DEFAULT_FILTER_DEBOUNCE_MS: u64 = 300;

/// Default lifetime of study feedback messages, in milliseconds.
pub const DEFAULT_FEEDBACK_TTL_MS: u64 = 1500;

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Apply pending database migrations and exit.
    MigrateDatabase,
    /// Import a TSV file into the vocabulary table and exit.
    ImportTsv,
    /// Interactive TUI for browsing and studying vocabulary.
    StudyTui,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `TANGOCHO_DATABASE_URL` or `--database-url`: Local `SQLite` database path
/// - `TANGOCHO_SELECTION_PATH` or `--selection-path`: Selection JSON file
/// - `TANGOCHO_IMPORT_TSV` or `--import-tsv`: TSV file to import
/// - `TANGOCHO_FILTER_DEBOUNCE_MS` or `--filter-debounce-ms`
/// - `TANGOCHO_FEEDBACK_TTL_MS` or `--feedback-ttl-ms`
///
/// # Example
///
/// ```no_run
/// use tangocho::TangochoConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = TangochoConfig::load().expect("failed to load configuration");
/// let database_url = config.require_database_url().expect("database URL required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "TANGOCHO",
    discovery(
        dotfile_name = ".tangocho.toml",
        config_file_name = "tangocho.toml",
        app_name = "tangocho"
    )
)]
pub struct TangochoConfig {
    /// Local `SQLite` database URL/path holding the vocabulary table.
    ///
    /// Diesel uses a filesystem path for `SQLite` connections. The same value is
    /// also used by the Diesel CLI via `DATABASE_URL` when running migrations.
    ///
    /// Can be provided via:
    /// - CLI: `--database-url <PATH>` or `-d <PATH>`
    /// - Environment: `TANGOCHO_DATABASE_URL`
    /// - Config file: `database_url = "..."`
    #[ortho_config(cli_short = 'd')]
    pub database_url: Option<String>,

    /// File the row selection is persisted to.
    ///
    /// Defaults to `selection.json` under the XDG state directory.
    #[ortho_config(cli_short = 's')]
    pub selection_path: Option<String>,

    /// Runs database migrations and exits.
    ///
    /// Can be provided via:
    /// - CLI: `--migrate-db`
    /// - Config file: `migrate_db = true`
    #[ortho_config()]
    pub migrate_db: bool,

    /// Imports the tab-separated file at this path and exits.
    #[ortho_config(cli_short = 'i')]
    pub import_tsv: Option<String>,

    /// Delay before integer column filters are applied, in milliseconds.
    #[ortho_config()]
    pub filter_debounce_ms: u64,

    /// Lifetime of study feedback messages, in milliseconds.
    #[ortho_config()]
    pub feedback_ttl_ms: u64,
}

impl Default for TangochoConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            selection_path: None,
            migrate_db: false,
            import_tsv: None,
            filter_debounce_ms: DEFAULT_FILTER_DEBOUNCE_MS,
            feedback_ttl_ms: DEFAULT_FEEDBACK_TTL_MS,
        }
    }
}

impl TangochoConfig {
    /// Determines the operation mode based on provided configuration.
    ///
    /// Migration wins over import, which wins over the interactive TUI.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.migrate_db {
            OperationMode::MigrateDatabase
        } else if self.import_tsv.is_some() {
            OperationMode::ImportTsv
        } else {
            OperationMode::StudyTui
        }
    }

    /// Returns the database URL or an error if missing or blank.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::MissingDatabaseUrl`] when no URL is
    /// configured and [`PersistenceError::BlankDatabaseUrl`] when it is blank.
    pub fn require_database_url(&self) -> Result<&str, PersistenceError> {
        let url = self
            .database_url
            .as_deref()
            .ok_or(PersistenceError::MissingDatabaseUrl)?;
        if url.trim().is_empty() {
            return Err(PersistenceError::BlankDatabaseUrl);
        }
        Ok(url)
    }

    /// Resolves the selection file, falling back to the XDG state default.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::NoDefaultPath`] when nothing is configured
    /// and no home directory is known.
    pub fn resolve_selection_path(&self) -> Result<Utf8PathBuf, SelectionError> {
        self.selection_path
            .as_deref()
            .filter(|path| !path.trim().is_empty())
            .map_or_else(default_selection_path, |path| Ok(Utf8PathBuf::from(path)))
    }

    /// Timer settings for the TUI.
    #[must_use]
    pub const fn tui_timings(&self) -> TuiTimings {
        TuiTimings {
            filter_debounce: Duration::from_millis(self.filter_debounce_ms),
            feedback_ttl: Duration::from_millis(self.feedback_ttl_ms),
        }
    }
}

#[cfg(test)]
mod tests;
