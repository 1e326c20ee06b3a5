//! TUI mode for browsing and studying vocabulary.
//!
//! This module wires the `SQLite` gateway, the durable selection file, and
//! the timer settings into the TUI startup context, then runs the
//! bubbletea-rs program.

use std::io::{self, Write};
use std::sync::Arc;

use bubbletea_rs::Program;
use tangocho::TangochoConfig;
use tangocho::persistence::SqliteVocabularyGateway;
use tangocho::tui::{AppContext, VocabularyApp, set_app_context};

use super::error::CliError;

/// Runs the interactive vocabulary TUI.
///
/// # Errors
///
/// Returns an error if:
/// - The database URL is missing or blank
/// - No selection file location can be resolved
/// - The TUI fails to initialise
pub async fn run(config: &TangochoConfig) -> Result<(), CliError> {
    let context = build_context(config)?;

    // If already set (e.g. re-running the TUI in the same process), the
    // existing context stays.
    if !set_app_context(context) {
        tracing::debug!("TUI context already set; keeping the existing one");
    }

    run_tui().await.map_err(|error| CliError::Io {
        message: format!("TUI error: {error}"),
    })
}

fn build_context(config: &TangochoConfig) -> Result<AppContext, CliError> {
    let database_url = config.require_database_url()?;
    let gateway = SqliteVocabularyGateway::new(database_url)?;

    // Telemetry stays silent while the alternate screen owns the terminal.
    let mut context = AppContext::new(Arc::new(gateway));
    context.selection_path = Some(config.resolve_selection_path()?);
    context.timings = config.tui_timings();
    Ok(context)
}

/// Runs the bubbletea-rs program with the `VocabularyApp` model.
async fn run_tui() -> Result<(), bubbletea_rs::Error> {
    // VocabularyApp::init() retrieves its context from module-level storage.
    let program = Program::<VocabularyApp>::builder().alt_screen(true).build()?;

    program.run().await?;

    io::stdout().flush().ok();

    Ok(())
}
