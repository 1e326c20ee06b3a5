//! Tangocho CLI entrypoint: vocabulary browser and flashcard trainer.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use tangocho::{OperationMode, TangochoConfig};

mod cli;

use cli::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), CliError> {
    let config = load_config()?;

    match config.operation_mode() {
        OperationMode::MigrateDatabase => cli::migrations::run(&config),
        OperationMode::ImportTsv => cli::import::run(&config).await,
        OperationMode::StudyTui => cli::study_tui::run(&config).await,
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`CliError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<TangochoConfig, CliError> {
    TangochoConfig::load().map_err(|error| CliError::Configuration {
        message: error.to_string(),
    })
}
