//! Main TUI application model implementing the MVU pattern.
//!
//! [`VocabularyApp`] owns the table view, the durable selection, and the
//! study session while one is running. The selection store is lent to the
//! table and the session for each mutation, so both views always read the
//! same mapping.
//!
//! # Module Structure
//!
//! - `data_handlers`: entry loading and refresh
//! - `table_handlers`: cursor movement, selection, sorting, resizing
//! - `filter_handlers`: filter editing, debounce ticks, overlays
//! - `study_handlers`: flashcard actions and flag persistence
//! - `rendering`: view rendering methods for terminal output

use std::sync::Arc;

use bubbletea_rs::Cmd;

use crate::selection::SelectionStore;
use crate::study::StudySession;
use crate::table::{ColumnId, TableView};
use crate::telemetry::{NoopTelemetrySink, TelemetrySink};
use crate::vocabulary::VocabularyGateway;

use super::input::InputContext;
use super::messages::AppMsg;
use super::state::DebouncedInput;
use super::storage::{AppContext, TuiTimings};

mod data_handlers;
mod filter_handlers;
mod model_impl;
mod rendering;
mod study_handlers;
mod table_handlers;
mod view_mode;

pub(crate) use view_mode::{CHROME_HEIGHT, MIN_TABLE_HEIGHT, Overlay, ViewMode};

/// Main application model for the vocabulary TUI.
pub struct VocabularyApp {
    /// Filtered, sorted entry table.
    pub(crate) table: TableView,
    /// Durable row selection shared by the table and the session.
    pub(crate) selection: SelectionStore,
    /// Running study session, if the study view is open.
    pub(crate) session: Option<StudySession>,
    /// Active view.
    pub(crate) view_mode: ViewMode,
    /// Overlay drawn over the table.
    pub(crate) overlay: Overlay,
    /// Column receiving sort, filter, and resize keys.
    pub(crate) focused_column: ColumnId,
    /// Integer filter text waiting for its debounce timer.
    pub(crate) integer_filter: DebouncedInput<(ColumnId, String)>,
    /// Whether an entry fetch is in flight.
    pub(crate) loading: bool,
    /// Status or error line for the table view.
    pub(crate) status: Option<String>,
    /// Whether the help overlay is visible.
    pub(crate) show_help: bool,
    /// Flag requests sent but not yet answered.
    flags_in_flight: usize,
    /// Set when a session closed while flag requests were unanswered; the
    /// table reloads once the last one lands.
    refresh_after_flags: bool,
    gateway: Option<Arc<dyn VocabularyGateway>>,
    telemetry: Arc<dyn TelemetrySink>,
    timings: TuiTimings,
    width: u16,
    height: u16,
}

impl std::fmt::Debug for VocabularyApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VocabularyApp")
            .field("table", &self.table)
            .field("selection", &self.selection)
            .field("session", &self.session)
            .field("view_mode", &self.view_mode)
            .field("overlay", &self.overlay)
            .field("loading", &self.loading)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl VocabularyApp {
    /// Creates an app reading entries from `gateway`.
    #[must_use]
    pub fn new(gateway: Arc<dyn VocabularyGateway>, selection: SelectionStore) -> Self {
        Self::build(Some(gateway), selection)
    }

    /// Creates an app with no backend; every fetch reports the problem.
    #[must_use]
    pub fn unconfigured(selection: SelectionStore) -> Self {
        Self::build(None, selection)
    }

    /// Creates an app from the startup context.
    #[must_use]
    pub fn from_context(context: &AppContext) -> Self {
        Self::new(Arc::clone(&context.gateway), context.load_selection())
            .with_telemetry(Arc::clone(&context.telemetry))
            .with_timings(context.timings)
    }

    fn build(gateway: Option<Arc<dyn VocabularyGateway>>, selection: SelectionStore) -> Self {
        Self {
            table: TableView::default(),
            selection,
            session: None,
            view_mode: ViewMode::Table,
            overlay: Overlay::None,
            focused_column: ColumnId::English,
            integer_filter: DebouncedInput::default(),
            loading: false,
            status: None,
            show_help: false,
            flags_in_flight: 0,
            refresh_after_flags: false,
            gateway,
            telemetry: Arc::new(NoopTelemetrySink),
            timings: TuiTimings::default(),
            width: 80,
            height: 24,
        }
    }

    /// Replaces the telemetry sink.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Replaces the timer settings.
    #[must_use]
    pub const fn with_timings(mut self, timings: TuiTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Sets the terminal dimensions used for the first frame.
    #[must_use]
    pub fn with_dimensions(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self.sync_scroll();
        self
    }

    /// Table state.
    #[must_use]
    pub const fn table(&self) -> &TableView {
        &self.table
    }

    /// Durable selection.
    #[must_use]
    pub const fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    /// Running study session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&StudySession> {
        self.session.as_ref()
    }

    /// Status or error line shown under the table.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Column receiving sort, filter, and resize keys.
    #[must_use]
    pub const fn focused_column(&self) -> ColumnId {
        self.focused_column
    }

    /// Returns true while the study view is open.
    #[must_use]
    pub const fn is_studying(&self) -> bool {
        matches!(self.view_mode, ViewMode::Study)
    }

    /// Rows available for the table body.
    pub(crate) fn table_height(&self) -> usize {
        usize::from(self.height)
            .saturating_sub(CHROME_HEIGHT)
            .max(MIN_TABLE_HEIGHT)
    }

    /// Current input context for context-aware key mapping.
    pub(crate) const fn input_context(&self) -> InputContext {
        match (&self.view_mode, &self.overlay) {
            (ViewMode::Study, _) => InputContext::Study,
            (ViewMode::Table, Overlay::None) => InputContext::Table,
            (ViewMode::Table, Overlay::FilterInput(_)) => InputContext::FilterInput,
            (ViewMode::Table, Overlay::Membership(_)) => InputContext::MembershipPicker,
            (ViewMode::Table, Overlay::ColumnFinder(_)) => InputContext::ColumnFinder,
        }
    }

    /// Handles a message and updates state accordingly.
    ///
    /// Delegates to specialised handlers for each message category to keep
    /// cyclomatic complexity low.
    pub fn handle_message(&mut self, msg: &AppMsg) -> Option<Cmd> {
        if msg.is_navigation() {
            return self.handle_navigation_msg(msg);
        }
        if msg.is_filter() {
            return self.handle_filter_msg(msg);
        }
        if msg.is_study() {
            return self.handle_study_msg(msg);
        }
        if msg.is_data() {
            return self.handle_data_msg(msg);
        }
        self.handle_lifecycle_msg(msg)
    }

    /// Dispatches lifecycle and window messages, passing table actions on.
    fn handle_lifecycle_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::Initialized => self.handle_refresh_requested(),
            AppMsg::Quit => Some(bubbletea_rs::quit()),
            AppMsg::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
            AppMsg::WindowResized { width, height } => {
                self.width = *width;
                self.height = *height;
                self.sync_scroll();
                None
            }
            _ => self.handle_table_action(msg),
        }
    }

    /// Keeps the table cursor inside the visible window.
    pub(crate) fn sync_scroll(&mut self) {
        let height = self.table_height();
        self.table.scroll_into_view(height);
    }

    /// Records a selection write failure in the status line.
    pub(crate) fn report_selection_error(&mut self, error: &crate::selection::SelectionError) {
        self.status = Some(format!("Error saving selection: {error}"));
    }
}
