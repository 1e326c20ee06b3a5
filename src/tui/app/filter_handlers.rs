//! Filter editing, debounce, and overlay handlers.
//!
//! Text and global filters apply on every keystroke. Integer-set filters
//! wait for the debounce timer: each keystroke schedules a new generation
//! and only the tick carrying the latest generation is applied.

use std::any::Any;
use std::time::Duration;

use bubbletea_rs::Cmd;
use tracing::debug;

use super::{Overlay, VocabularyApp};
use crate::table::{
    ColumnFinder, ColumnId, ColumnNode, ColumnPredicate, FilterKind, FilterPredicateSet, NodeStatus,
};
use crate::tui::messages::AppMsg;
use crate::tui::state::{FilterEditor, FilterTarget, FinderNav, MembershipPicker};

impl VocabularyApp {
    /// Dispatches filter and overlay messages to their handlers.
    pub(super) fn handle_filter_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::EditColumnFilter => self.handle_edit_column_filter(),
            AppMsg::EditGlobalSearch => self.open_editor(FilterTarget::Global),
            AppMsg::ClearFilters => self.handle_clear_filters(),
            AppMsg::InputChar(ch) => return self.handle_input_edit(|editor| {
                editor.push(*ch);
                true
            }),
            AppMsg::InputBackspace => return self.handle_input_edit(FilterEditor::backspace),
            AppMsg::InputSubmit => self.handle_input_submit(),
            AppMsg::FilterDebounceTick { generation } => self.handle_debounce_tick(*generation),
            AppMsg::OpenColumnFinder => self.handle_open_column_finder(),
            AppMsg::OverlayToggle => self.handle_overlay_toggle(),
            AppMsg::OverlayEnter => self.handle_overlay_enter(),
            AppMsg::OverlayBack => self.handle_overlay_back(),
            AppMsg::InputCancel | AppMsg::CloseOverlay => self.overlay = Overlay::None,
            _ => {}
        }
        None
    }

    /// Opens the editor or picker matching the focused column's filter.
    fn handle_edit_column_filter(&mut self) {
        let column = self.focused_column;
        match column.filter_kind() {
            FilterKind::Membership => self.open_membership_picker(column),
            FilterKind::Substring | FilterKind::IntegerSet => {
                self.open_editor(FilterTarget::Column(column));
            }
        }
    }

    fn open_editor(&mut self, target: FilterTarget) {
        let filters = self.table.filters();
        let initial = match target {
            FilterTarget::Global => filters.global().unwrap_or_default().to_owned(),
            FilterTarget::Column(column) => match self.integer_filter.pending() {
                Some((pending_column, text)) if *pending_column == column => text.clone(),
                _ => filters
                    .predicate(column)
                    .map(ColumnPredicate::label)
                    .unwrap_or_default(),
            },
        };
        self.overlay = Overlay::FilterInput(FilterEditor::open(target, initial));
    }

    fn open_membership_picker(&mut self, column: ColumnId) {
        let options = self.table.membership_options(column);
        self.overlay = Overlay::Membership(MembershipPicker::new(column, options));
    }

    fn handle_clear_filters(&mut self) {
        self.integer_filter.cancel();
        self.table.edit_filters(FilterPredicateSet::clear_all);
        self.sync_scroll();
    }

    /// Applies an edit to the open filter editor.
    ///
    /// Returns the debounce timer command for integer-set filters.
    fn handle_input_edit<F>(&mut self, edit: F) -> Option<Cmd>
    where
        F: FnOnce(&mut FilterEditor) -> bool,
    {
        let Overlay::FilterInput(editor) = &mut self.overlay else {
            return None;
        };
        if !edit(editor) {
            return None;
        }
        let target = editor.target();
        let text = editor.text().to_owned();
        match target {
            FilterTarget::Column(column) if target.is_debounced() => {
                // One timer slot: input left pending on another column lands first.
                if self
                    .integer_filter
                    .pending()
                    .is_some_and(|(pending_column, _)| *pending_column != column)
                {
                    self.flush_integer_filter();
                }
                let generation = self.integer_filter.schedule((column, text));
                Some(self.arm_filter_debounce(generation))
            }
            FilterTarget::Column(column) => {
                self.table
                    .edit_filters(|filters| filters.set_substring(column, &text));
                self.sync_scroll();
                None
            }
            FilterTarget::Global => {
                self.table.edit_filters(|filters| filters.set_global(&text));
                self.sync_scroll();
                None
            }
        }
    }

    fn arm_filter_debounce(&self, generation: u64) -> Cmd {
        let delay: Duration = self.timings.filter_debounce;
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            Some(Box::new(AppMsg::FilterDebounceTick { generation }) as Box<dyn Any + Send>)
        })
    }

    fn handle_debounce_tick(&mut self, generation: u64) {
        if let Some((column, spec)) = self.integer_filter.take_if_current(generation) {
            self.apply_integer_filter(column, &spec);
        }
    }

    /// Applies a pending integer filter without waiting for its timer.
    pub(super) fn flush_integer_filter(&mut self) {
        if let Some((column, spec)) = self.integer_filter.flush() {
            self.apply_integer_filter(column, &spec);
        }
    }

    fn apply_integer_filter(&mut self, column: ColumnId, spec: &str) {
        debug!(column = column.key(), spec, "integer filter applied");
        self.table
            .edit_filters(|filters| filters.set_integer_set(column, spec));
        self.sync_scroll();
    }

    fn handle_input_submit(&mut self) {
        self.flush_integer_filter();
        self.overlay = Overlay::None;
    }

    fn handle_open_column_finder(&mut self) {
        self.table.finder_mut().reset();
        self.overlay = Overlay::ColumnFinder(FinderNav::default());
    }

    /// Toggles the highlighted membership value or column visibility.
    fn handle_overlay_toggle(&mut self) {
        match &self.overlay {
            Overlay::Membership(picker) => {
                let column = picker.column();
                let Some(value) = picker.current().map(str::to_owned) else {
                    return;
                };
                self.table
                    .edit_filters(|filters| filters.toggle_membership_value(column, &value));
                self.sync_scroll();
            }
            Overlay::ColumnFinder(nav) => {
                let highlighted = *nav;
                self.toggle_finder_column(highlighted);
            }
            Overlay::None | Overlay::FilterInput(_) => {}
        }
    }

    fn toggle_finder_column(&mut self, nav: FinderNav) {
        let Some(node) = nav.current(self.table.finder()) else {
            return;
        };
        let NodeStatus::Available { visible, .. } =
            ColumnFinder::status(node, self.table.layout())
        else {
            return;
        };
        let node_id = node.id().to_owned();
        if self
            .table
            .toggle_finder_visibility(nav.level(), &node_id, !visible)
        {
            self.ensure_focus_visible();
        }
    }

    /// Opens the highlighted group, or the value picker of a leaf that
    /// offers one.
    fn handle_overlay_enter(&mut self) {
        let Overlay::ColumnFinder(nav) = &mut self.overlay else {
            return;
        };
        let picker_column = nav
            .current(self.table.finder())
            .filter(|node| !node.is_group() && node.has_membership_filter())
            .and_then(ColumnNode::column);
        if let Some(column) = picker_column {
            self.open_membership_picker(column);
            return;
        }
        nav.enter(self.table.finder_mut());
    }

    fn handle_overlay_back(&mut self) {
        if let Overlay::ColumnFinder(nav) = &mut self.overlay {
            nav.back(self.table.finder());
        }
    }
}
