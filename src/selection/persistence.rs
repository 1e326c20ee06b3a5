//! Durable backends for the row selection.

use std::io::ErrorKind;
use std::sync::{Arc, Mutex};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use thiserror::Error;

/// Errors raised while reading or writing the persisted selection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// The selection file or its directory could not be accessed.
    #[error("selection storage error: {message}")]
    Io {
        /// Error detail.
        message: String,
    },

    /// The in-memory mapping could not be serialised.
    #[error("failed to serialise selection: {message}")]
    Serialise {
        /// Error detail from serde.
        message: String,
    },

    /// No default location could be derived from the environment.
    #[error("unable to resolve selection path: neither XDG_STATE_HOME nor HOME is set")]
    NoDefaultPath,
}

/// Storage holding the JSON image of the selection.
pub trait SelectionPersistence: Send {
    /// Returns the stored document, or `None` when nothing was stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] when the storage cannot be read.
    fn read(&self) -> Result<Option<String>, SelectionError>;

    /// Replaces the stored document.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] when the storage cannot be written.
    fn write(&mut self, document: &str) -> Result<(), SelectionError>;
}

/// Selection stored in a JSON file.
#[derive(Debug)]
pub struct JsonFileSelection {
    path: Utf8PathBuf,
    dir: Dir,
    file_name: String,
}

impl JsonFileSelection {
    /// Opens the directory holding `path`, creating it when needed.
    ///
    /// The file itself is created on the first write.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::Io`] when the path has no file name or the
    /// parent directory cannot be created or opened.
    pub fn open(path: &Utf8Path) -> Result<Self, SelectionError> {
        let file_name = path.file_name().ok_or_else(|| SelectionError::Io {
            message: format!("invalid selection path '{path}': no file name"),
        })?;
        let parent = path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));

        let (root, relative) = if let Ok(stripped) = parent.strip_prefix("/") {
            (open_ambient("/")?, stripped)
        } else {
            (open_ambient(".")?, parent)
        };

        let dir = if relative.as_str().is_empty() || relative == Utf8Path::new(".") {
            root
        } else {
            root.create_dir_all(relative)
                .map_err(|error| SelectionError::Io {
                    message: format!("failed to create selection directory '{parent}': {error}"),
                })?;
            root.open_dir(relative).map_err(|error| SelectionError::Io {
                message: format!("failed to open selection directory '{parent}': {error}"),
            })?
        };

        Ok(Self {
            path: path.to_path_buf(),
            dir,
            file_name: file_name.to_owned(),
        })
    }

    /// Location of the selection file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

fn open_ambient(path: &str) -> Result<Dir, SelectionError> {
    Dir::open_ambient_dir(path, ambient_authority()).map_err(|error| SelectionError::Io {
        message: format!("failed to open directory '{path}' for selection: {error}"),
    })
}

impl SelectionPersistence for JsonFileSelection {
    fn read(&self) -> Result<Option<String>, SelectionError> {
        match self.dir.read_to_string(&self.file_name) {
            Ok(document) => Ok(Some(document)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(SelectionError::Io {
                message: format!("failed to read selection '{}': {error}", self.path),
            }),
        }
    }

    fn write(&mut self, document: &str) -> Result<(), SelectionError> {
        self.dir
            .write(&self.file_name, document)
            .map_err(|error| SelectionError::Io {
                message: format!("failed to write selection '{}': {error}", self.path),
            })
    }
}

/// Selection kept in a shared in-memory buffer.
///
/// Clones share the same buffer, so a test can keep one handle and inspect
/// what the store wrote through another.
#[derive(Debug, Clone, Default)]
pub struct InMemorySelection {
    document: Arc<Mutex<Option<String>>>,
}

impl InMemorySelection {
    /// Creates a buffer that already holds `document`.
    #[must_use]
    pub fn with_document(document: &str) -> Self {
        Self {
            document: Arc::new(Mutex::new(Some(document.to_owned()))),
        }
    }

    /// Returns the last written document.
    #[must_use]
    pub fn document(&self) -> Option<String> {
        self.document
            .lock()
            .ok()
            .and_then(|document| document.clone())
    }
}

impl SelectionPersistence for InMemorySelection {
    fn read(&self) -> Result<Option<String>, SelectionError> {
        Ok(self.document())
    }

    fn write(&mut self, document: &str) -> Result<(), SelectionError> {
        let mut guard = self.document.lock().map_err(|error| SelectionError::Io {
            message: format!("selection buffer poisoned: {error}"),
        })?;
        *guard = Some(document.to_owned());
        Ok(())
    }
}

/// Resolves the default selection file.
///
/// Defaults to `${XDG_STATE_HOME}/tangocho/selection.json` when
/// `XDG_STATE_HOME` is set, else to
/// `${HOME}/.local/state/tangocho/selection.json`.
///
/// # Errors
///
/// Returns [`SelectionError::NoDefaultPath`] when neither variable is set.
pub fn default_selection_path() -> Result<Utf8PathBuf, SelectionError> {
    let xdg = std::env::var("XDG_STATE_HOME")
        .ok()
        .filter(|value| !value.is_empty());
    let home = std::env::var("HOME").ok().filter(|value| !value.is_empty());

    resolve_selection_path(xdg.as_deref(), home.as_deref())
}

/// Resolves the selection file from optional environment values.
pub(crate) fn resolve_selection_path(
    xdg_state_home: Option<&str>,
    home: Option<&str>,
) -> Result<Utf8PathBuf, SelectionError> {
    if let Some(state_home) = xdg_state_home {
        return Ok(Utf8PathBuf::from(state_home)
            .join("tangocho")
            .join("selection.json"));
    }

    if let Some(home_dir) = home {
        return Ok(Utf8PathBuf::from(home_dir)
            .join(".local")
            .join("state")
            .join("tangocho")
            .join("selection.json"));
    }

    Err(SelectionError::NoDefaultPath)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn utf8_temp_dir(temp_dir: &TempDir) -> Result<Utf8PathBuf, Box<dyn std::error::Error>> {
        Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf())
            .map_err(|_| "temp directory path must be UTF-8".into())
    }

    #[rstest]
    #[case(Some("/tmp/state"), Some("/home/u"), "/tmp/state/tangocho/selection.json")]
    #[case(None, Some("/home/u"), "/home/u/.local/state/tangocho/selection.json")]
    fn resolves_default_path(
        #[case] xdg: Option<&str>,
        #[case] home: Option<&str>,
        #[case] expected: &str,
    ) -> TestResult {
        assert_eq!(resolve_selection_path(xdg, home)?, Utf8PathBuf::from(expected));
        Ok(())
    }

    #[test]
    fn default_path_requires_some_base() {
        assert_eq!(
            resolve_selection_path(None, None),
            Err(SelectionError::NoDefaultPath)
        );
    }

    #[test]
    fn file_backend_reports_missing_file_as_absent() -> TestResult {
        let temp_dir = TempDir::new()?;
        let path = utf8_temp_dir(&temp_dir)?.join("nested").join("selection.json");

        let backend = JsonFileSelection::open(&path)?;

        assert_eq!(backend.read()?, None);
        assert_eq!(backend.path(), path.as_path());
        Ok(())
    }

    #[test]
    fn file_backend_replaces_document_on_write() -> TestResult {
        let temp_dir = TempDir::new()?;
        let path = utf8_temp_dir(&temp_dir)?.join("selection.json");
        let mut backend = JsonFileSelection::open(&path)?;

        backend.write(r#"{"1":true,"2":true}"#)?;
        backend.write(r#"{"2":true}"#)?;

        assert_eq!(backend.read()?.as_deref(), Some(r#"{"2":true}"#));
        Ok(())
    }

    #[test]
    fn in_memory_clones_share_a_buffer() -> TestResult {
        let observer = InMemorySelection::default();
        let mut writer = observer.clone();

        writer.write("{}")?;

        assert_eq!(observer.document().as_deref(), Some("{}"));
        Ok(())
    }
}
