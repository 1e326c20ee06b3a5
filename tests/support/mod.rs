//! Shared test utilities.

use tangocho::persistence::migrate_database;
use tangocho::telemetry::NoopTelemetrySink;
use tempfile::TempDir;
use tokio::runtime::Runtime;

/// Creates a temporary directory for database and selection files.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
pub fn create_temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|error| panic!("failed to create temporary directory: {error}"))
}

/// Creates a migrated `SQLite` database inside `temp_dir` and returns its URL.
///
/// # Panics
///
/// Panics if the migrations fail.
pub fn migrated_database(temp_dir: &TempDir) -> String {
    let database_url = temp_dir
        .path()
        .join("tangocho.sqlite")
        .to_string_lossy()
        .to_string();
    migrate_database(&database_url, &NoopTelemetrySink)
        .unwrap_or_else(|error| panic!("failed to migrate test database: {error}"));
    database_url
}

/// Runs `future` to completion on a fresh Tokio runtime.
///
/// # Panics
///
/// Panics if the runtime cannot be created.
pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
    let runtime =
        Runtime::new().unwrap_or_else(|error| panic!("failed to create Tokio runtime: {error}"));
    runtime.block_on(future)
}

/// Parses a comma-separated id list such as `"1,3"`.
///
/// # Panics
///
/// Panics on anything that is not an integer.
pub fn parse_ids(text: &str) -> Vec<i64> {
    text.trim_matches('"')
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse()
                .unwrap_or_else(|error| panic!("invalid id {part:?}: {error}"))
        })
        .collect()
}
