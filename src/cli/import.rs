//! Bulk import of tab-separated vocabulary rows.

use std::io::{self, Write};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use tangocho::TangochoConfig;
use tangocho::persistence::SqliteVocabularyGateway;
use tangocho::vocabulary::{ImportSummary, VocabularyGateway};

use super::error::CliError;

/// Imports the configured TSV file and prints the resulting status line.
///
/// # Errors
///
/// Returns [`CliError::Configuration`] when no file or database is
/// configured, [`CliError::Io`] when the file cannot be read, and
/// [`CliError::Gateway`] when the rows are rejected. A rejected import
/// inserts nothing.
pub async fn run(config: &TangochoConfig) -> Result<(), CliError> {
    let path = config
        .import_tsv
        .as_deref()
        .ok_or_else(|| CliError::Configuration {
            message: "no TSV file given (use --import-tsv)".to_owned(),
        })?;
    let database_url = config.require_database_url()?;

    let payload = read_utf8_file(Utf8Path::new(path))?;
    let gateway = SqliteVocabularyGateway::new(database_url)?;
    let summary = import_payload(&gateway, &payload).await?;

    writeln!(io::stdout().lock(), "{summary}.").map_err(|error| CliError::Io {
        message: error.to_string(),
    })
}

/// Sends `payload` to the backend in one request.
pub(crate) async fn import_payload(
    gateway: &dyn VocabularyGateway,
    payload: &str,
) -> Result<ImportSummary, CliError> {
    Ok(gateway.import_entries(payload).await?)
}

fn read_utf8_file(path: &Utf8Path) -> Result<String, CliError> {
    let file_name = path.file_name().ok_or_else(|| CliError::Configuration {
        message: format!("invalid TSV path '{path}': no file name"),
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| CliError::Io {
        message: format!("failed to open directory '{parent}': {error}"),
    })?;
    dir.read_to_string(file_name)
        .map_err(|error| CliError::Io {
            message: format!("failed to read TSV file '{path}': {error}"),
        })
}
