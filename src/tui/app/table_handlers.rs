//! Table navigation, selection, sorting, and resizing handlers.
//!
//! Row movement goes through [`crate::table::TableView`], which keeps the
//! cursor within the visible rows; the scroll window is then synchronised
//! with the current terminal height.

use bubbletea_rs::Cmd;
use tracing::debug;

use super::{Overlay, ViewMode, VocabularyApp};
use crate::study::StudySession;
use crate::table::{ColumnId, SelectAllState};
use crate::tui::messages::AppMsg;

/// Cells added or removed by one resize key press.
const RESIZE_STEP: i16 = 1;

impl VocabularyApp {
    /// Dispatches navigation messages to the table or the open overlay.
    pub(super) fn handle_navigation_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        if !matches!(self.overlay, Overlay::None) {
            self.handle_overlay_navigation(msg);
            return None;
        }
        let page = self.table_height();
        match msg {
            AppMsg::CursorUp => self.table.cursor_up(),
            AppMsg::CursorDown => self.table.cursor_down(),
            AppMsg::PageUp => self.table.page_up(page),
            AppMsg::PageDown => self.table.page_down(page),
            AppMsg::Home => self.table.cursor_home(),
            AppMsg::End => self.table.cursor_end(),
            AppMsg::ColumnLeft => self.move_column_focus(false),
            AppMsg::ColumnRight => self.move_column_focus(true),
            _ => {}
        }
        self.sync_scroll();
        None
    }

    fn handle_overlay_navigation(&mut self, msg: &AppMsg) {
        let up = matches!(msg, AppMsg::CursorUp);
        let down = matches!(msg, AppMsg::CursorDown);
        match &mut self.overlay {
            Overlay::Membership(picker) if up => picker.up(),
            Overlay::Membership(picker) if down => picker.down(),
            Overlay::ColumnFinder(nav) if up => nav.up(),
            Overlay::ColumnFinder(nav) if down => nav.down(self.table.finder()),
            _ => {}
        }
    }

    /// Dispatches row selection, sort, resize, and session start messages.
    pub(super) fn handle_table_action(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::ToggleRow => self.handle_toggle_row(),
            AppMsg::ToggleAllVisible => self.handle_toggle_all_visible(),
            AppMsg::SortColumn { multi } => {
                self.table.toggle_sort(self.focused_column, *multi);
                self.sync_scroll();
            }
            AppMsg::ClearSort => {
                self.table.clear_sort();
                self.sync_scroll();
            }
            AppMsg::WidenColumn => self.resize_focused(RESIZE_STEP),
            AppMsg::NarrowColumn => self.resize_focused(RESIZE_STEP.saturating_neg()),
            AppMsg::StartSession => self.handle_start_session(),
            _ => {}
        }
        None
    }

    fn handle_toggle_row(&mut self) {
        if let Err(error) = self.table.toggle_cursor_row(&mut self.selection) {
            self.report_selection_error(&error);
        }
    }

    /// Selects every visible row unless all of them already are.
    fn handle_toggle_all_visible(&mut self) {
        let select = self.table.select_all_state(&self.selection) != SelectAllState::Checked;
        if let Err(error) = self.table.toggle_all_visible(select, &mut self.selection) {
            self.report_selection_error(&error);
        }
    }

    fn resize_focused(&mut self, delta: i16) {
        let column = self.focused_column;
        if let Some(width) = self.table.layout_mut().resize_by(column, delta) {
            debug!(column = column.key(), width, "column resized");
        }
    }

    /// Moves the focus to the neighbouring visible column, stopping at the
    /// edges.
    fn move_column_focus(&mut self, forward: bool) {
        let visible: Vec<ColumnId> = self
            .table
            .layout()
            .visible_columns()
            .map(|layout| layout.column)
            .collect();
        let Some(position) = visible
            .iter()
            .position(|column| *column == self.focused_column)
        else {
            self.ensure_focus_visible();
            return;
        };
        let target = if forward {
            visible.get(position.saturating_add(1))
        } else {
            position
                .checked_sub(1)
                .and_then(|index| visible.get(index))
        };
        if let Some(column) = target {
            self.focused_column = *column;
        }
    }

    /// Moves the focus to the first visible column when the focused column
    /// has been hidden.
    pub(super) fn ensure_focus_visible(&mut self) {
        let layout = self.table.layout();
        if layout.is_visible(self.focused_column) {
            return;
        }
        if let Some(first) = layout.visible_columns().next() {
            self.focused_column = first.column;
        }
    }

    /// Snapshots the selected entries into a new study session.
    ///
    /// Integer filter input still waiting for its timer is discarded.
    fn handle_start_session(&mut self) {
        self.integer_filter.cancel();
        let entries = self.table.selected_entries(&self.selection);
        debug!(entry_count = entries.len(), "study session started");
        self.session = Some(StudySession::start(entries));
        self.view_mode = ViewMode::Study;
        self.overlay = Overlay::None;
    }
}
