//! Errors surfaced by the command-line entry points.

use thiserror::Error;

use tangocho::persistence::PersistenceError;
use tangocho::selection::SelectionError;
use tangocho::vocabulary::GatewayError;

/// Failure of one CLI operation, printed to stderr before a non-zero exit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CliError {
    /// Configuration could not be loaded or is incomplete.
    #[error("configuration error: {message}")]
    Configuration {
        /// What was wrong.
        message: String,
    },

    /// A database, file, or terminal operation failed.
    #[error("{message}")]
    Io {
        /// Error detail.
        message: String,
    },

    /// The vocabulary backend refused a request.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl From<PersistenceError> for CliError {
    fn from(error: PersistenceError) -> Self {
        if is_configuration_error(&error) {
            Self::Configuration {
                message: error.to_string(),
            }
        } else {
            Self::Io {
                message: error.to_string(),
            }
        }
    }
}

impl From<SelectionError> for CliError {
    fn from(error: SelectionError) -> Self {
        match error {
            SelectionError::NoDefaultPath => Self::Configuration {
                message: error.to_string(),
            },
            SelectionError::Io { .. } | SelectionError::Serialise { .. } => Self::Io {
                message: error.to_string(),
            },
        }
    }
}

/// Returns true if the persistence error is a configuration problem.
const fn is_configuration_error(error: &PersistenceError) -> bool {
    matches!(
        error,
        PersistenceError::MissingDatabaseUrl | PersistenceError::BlankDatabaseUrl
    )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use tangocho::persistence::PersistenceError;

    use super::CliError;

    #[rstest]
    #[case::missing(PersistenceError::MissingDatabaseUrl, true)]
    #[case::blank(PersistenceError::BlankDatabaseUrl, true)]
    #[case::connection(
        PersistenceError::ConnectionFailed { message: "locked".to_owned() },
        false
    )]
    #[case::schema(PersistenceError::SchemaNotInitialised, false)]
    fn persistence_errors_are_classified(
        #[case] error: PersistenceError,
        #[case] is_configuration: bool,
    ) {
        let mapped = CliError::from(error);

        assert_eq!(
            matches!(mapped, CliError::Configuration { .. }),
            is_configuration
        );
    }
}
