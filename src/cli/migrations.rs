//! Database migration operations.

use tangocho::TangochoConfig;
use tangocho::persistence::migrate_database;
use tangocho::telemetry::StderrJsonlTelemetrySink;
use tracing::info;

use super::error::CliError;

/// Runs database migrations.
///
/// # Errors
///
/// Returns [`CliError::Configuration`] if the database URL is missing or
/// blank, and [`CliError::Io`] for connection or migration failures.
pub fn run(config: &TangochoConfig) -> Result<(), CliError> {
    let database_url = config.require_database_url()?;

    let telemetry = StderrJsonlTelemetrySink;
    let version = migrate_database(database_url, &telemetry)?;
    info!(schema_version = version.as_str(), "database migrated");
    Ok(())
}
