//! Startup context storage for the vocabulary TUI.
//!
//! bubbletea-rs calls `Model::init()` as a static function, so everything
//! the app needs at startup is parked in `OnceLock` values by the CLI
//! before the program runs.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use camino::Utf8PathBuf;
use crossterm::terminal;
use tracing::warn;

use crate::selection::{InMemorySelection, JsonFileSelection, SelectionStore};
use crate::telemetry::{NoopTelemetrySink, TelemetrySink};
use crate::vocabulary::VocabularyGateway;

const DEFAULT_WIDTH: u16 = 80;
const DEFAULT_HEIGHT: u16 = 24;

/// Default delay before integer filter input is applied.
pub const DEFAULT_FILTER_DEBOUNCE: Duration = Duration::from_millis(300);

/// Default lifetime of study feedback messages.
pub const DEFAULT_FEEDBACK_TTL: Duration = Duration::from_millis(1500);

static APP_CONTEXT: OnceLock<AppContext> = OnceLock::new();

/// Timer settings for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TuiTimings {
    /// Delay before integer filter input is applied.
    pub filter_debounce: Duration,
    /// Lifetime of study feedback messages.
    pub feedback_ttl: Duration,
}

impl Default for TuiTimings {
    fn default() -> Self {
        Self {
            filter_debounce: DEFAULT_FILTER_DEBOUNCE,
            feedback_ttl: DEFAULT_FEEDBACK_TTL,
        }
    }
}

/// Collaborators handed to the TUI at startup.
#[derive(Clone)]
pub struct AppContext {
    /// Backend owning the vocabulary entries.
    pub gateway: Arc<dyn VocabularyGateway>,
    /// Telemetry destination.
    pub telemetry: Arc<dyn TelemetrySink>,
    /// Where the selection is persisted; `None` keeps it in memory.
    pub selection_path: Option<Utf8PathBuf>,
    /// Timer settings.
    pub timings: TuiTimings,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("selection_path", &self.selection_path)
            .field("timings", &self.timings)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Creates a context with in-memory selection and default timings.
    #[must_use]
    pub fn new(gateway: Arc<dyn VocabularyGateway>) -> Self {
        Self {
            gateway,
            telemetry: Arc::new(NoopTelemetrySink),
            selection_path: None,
            timings: TuiTimings::default(),
        }
    }

    /// Loads the selection store described by this context.
    ///
    /// A selection file that cannot be opened falls back to an in-memory
    /// selection for this run; the failure is logged.
    #[must_use]
    pub fn load_selection(&self) -> SelectionStore {
        let Some(path) = &self.selection_path else {
            return SelectionStore::load(
                Box::new(InMemorySelection::default()),
                self.telemetry.as_ref(),
            );
        };
        match JsonFileSelection::open(path) {
            Ok(backend) => SelectionStore::load(Box::new(backend), self.telemetry.as_ref()),
            Err(error) => {
                warn!(path = %path, error = %error, "selection file unavailable; using memory");
                SelectionStore::load(
                    Box::new(InMemorySelection::default()),
                    self.telemetry.as_ref(),
                )
            }
        }
    }
}

/// Sets the startup context for the TUI application.
///
/// This must be called before starting the bubbletea-rs program.
///
/// # Returns
///
/// `true` if the context was set, `false` if it was already set.
pub fn set_app_context(context: AppContext) -> bool {
    APP_CONTEXT.set(context).is_ok()
}

/// Gets the startup context, if configured.
pub(crate) fn get_app_context() -> Option<AppContext> {
    APP_CONTEXT.get().cloned()
}

/// Gets the terminal size, falling back to 80x24 when it cannot be read.
pub(crate) fn get_initial_terminal_size() -> (u16, u16) {
    terminal::size()
        .ok()
        .filter(|(width, height)| *width > 0 && *height > 0)
        .unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT))
}
