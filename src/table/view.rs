//! Filtered, sorted, and selectable view over the entry collection.
//!
//! [`TableView`] owns the entry copies fetched from the backend together
//! with the filter, sort, layout, and cursor state. The visible rows are
//! cached as indices into the collection and rebuilt after every change to
//! entries, predicates, or sort keys. Selection lives in the
//! [`SelectionStore`] lent by the caller.

use super::columns::ColumnId;
use super::cursor::RowCursor;
use super::filter::FilterPredicateSet;
use super::finder::ColumnFinder;
use super::layout::TableLayout;
use super::sort::SortSpec;
use crate::selection::{SelectionError, SelectionStore};
use crate::vocabulary::Entry;

/// Tri-state of the header checkbox over the visible rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    /// Every visible row is selected (and at least one is visible).
    Checked,
    /// Some, but not all, visible rows are selected.
    Indeterminate,
    /// No visible row is selected.
    Unchecked,
}

/// Table state composed over a raw entry collection.
#[derive(Debug, Clone, Default)]
pub struct TableView {
    entries: Vec<Entry>,
    filters: FilterPredicateSet,
    sort: SortSpec,
    layout: TableLayout,
    finder: ColumnFinder,
    cursor: RowCursor,
    visible: Vec<usize>,
}

impl TableView {
    /// Creates a view over `entries` with no filters or sorting.
    #[must_use]
    pub fn new(entries: Vec<Entry>) -> Self {
        let mut view = Self::default();
        view.replace_entries(entries);
        view
    }

    /// Replaces the entry collection wholesale.
    ///
    /// Filters, sort keys, and layout are kept; the cursor is clamped.
    pub fn replace_entries(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
        self.refresh();
    }

    /// Full entry collection in input order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Active filter predicates.
    #[must_use]
    pub const fn filters(&self) -> &FilterPredicateSet {
        &self.filters
    }

    /// Applies `edit` to the filter predicates and rebuilds the visible rows.
    pub fn edit_filters<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut FilterPredicateSet),
    {
        edit(&mut self.filters);
        self.refresh();
    }

    /// Active sort keys.
    #[must_use]
    pub const fn sort_spec(&self) -> &SortSpec {
        &self.sort
    }

    /// Cycles the sort state of `column`; see [`SortSpec::toggle`].
    pub fn toggle_sort(&mut self, column: ColumnId, multi: bool) {
        self.sort.toggle(column, multi);
        self.refresh();
    }

    /// Removes every sort key, restoring input order.
    pub fn clear_sort(&mut self) {
        self.sort.clear();
        self.refresh();
    }

    /// Column visibility and widths.
    #[must_use]
    pub const fn layout(&self) -> &TableLayout {
        &self.layout
    }

    /// Mutable column visibility and widths.
    ///
    /// Layout changes never affect which rows are visible.
    pub const fn layout_mut(&mut self) -> &mut TableLayout {
        &mut self.layout
    }

    /// Column finder drill-down state.
    #[must_use]
    pub const fn finder(&self) -> &ColumnFinder {
        &self.finder
    }

    /// Mutable column finder state.
    pub const fn finder_mut(&mut self) -> &mut ColumnFinder {
        &mut self.finder
    }

    /// Shows or hides the column bound to a finder node.
    ///
    /// Returns false when the node is missing or unavailable.
    pub fn toggle_finder_visibility(
        &mut self,
        level: usize,
        node_id: &str,
        visible: bool,
    ) -> bool {
        self.finder
            .toggle_visibility(&mut self.layout, level, node_id, visible)
    }

    /// Visible rows: filtered by every predicate and sorted by the sort keys.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<&Entry> {
        self.visible
            .iter()
            .filter_map(|index| self.entries.get(*index))
            .collect()
    }

    /// Number of visible rows.
    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Current cursor state.
    #[must_use]
    pub const fn cursor(&self) -> RowCursor {
        self.cursor
    }

    /// Entry under the cursor.
    #[must_use]
    pub fn cursor_entry(&self) -> Option<&Entry> {
        self.visible
            .get(self.cursor.position)
            .and_then(|index| self.entries.get(*index))
    }

    /// Moves the cursor up one row.
    pub const fn cursor_up(&mut self) {
        self.cursor.up();
    }

    /// Moves the cursor down one row.
    pub fn cursor_down(&mut self) {
        self.cursor.down(self.max_index());
    }

    /// Moves the cursor up a page.
    pub const fn page_up(&mut self, page_size: usize) {
        self.cursor.page_up(page_size);
    }

    /// Moves the cursor down a page.
    pub fn page_down(&mut self, page_size: usize) {
        self.cursor.page_down(page_size, self.max_index());
    }

    /// Moves the cursor to the first row.
    pub const fn cursor_home(&mut self) {
        self.cursor.home();
    }

    /// Moves the cursor to the last row.
    pub fn cursor_end(&mut self) {
        self.cursor.end(self.max_index());
    }

    /// Keeps the cursor inside a viewport of `height` rows.
    pub const fn scroll_into_view(&mut self, height: usize) {
        self.cursor.scroll_into_view(height);
    }

    /// Flips the selection of entry `id`, returning its new state.
    ///
    /// Returns `None` without touching the selection when `id` is not part
    /// of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] when the selection cannot be written.
    pub fn toggle_row(
        &self,
        id: i64,
        selection: &mut SelectionStore,
    ) -> Result<Option<bool>, SelectionError> {
        if !self.entries.iter().any(|entry| entry.id == id) {
            return Ok(None);
        }
        let selected = !selection.is_selected(id);
        selection.set_selected(id, selected)?;
        Ok(Some(selected))
    }

    /// Flips the selection of the row under the cursor.
    ///
    /// Returns `None` when no row is visible.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] when the selection cannot be written.
    pub fn toggle_cursor_row(
        &self,
        selection: &mut SelectionStore,
    ) -> Result<Option<bool>, SelectionError> {
        self.cursor_entry()
            .map_or(Ok(None), |entry| self.toggle_row(entry.id, selection))
    }

    /// Selects or deselects every visible row; hidden rows are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] when the selection cannot be written.
    pub fn toggle_all_visible(
        &self,
        selected: bool,
        selection: &mut SelectionStore,
    ) -> Result<(), SelectionError> {
        let ids: Vec<i64> = self.visible_rows().iter().map(|entry| entry.id).collect();
        selection.toggle_all(ids, selected)
    }

    /// Header checkbox state over the visible rows.
    #[must_use]
    pub fn select_all_state(&self, selection: &SelectionStore) -> SelectAllState {
        let rows = self.visible_rows();
        let selected = rows
            .iter()
            .filter(|entry| selection.is_selected(entry.id))
            .count();
        if selected == 0 {
            SelectAllState::Unchecked
        } else if selected == rows.len() {
            SelectAllState::Checked
        } else {
            SelectAllState::Indeterminate
        }
    }

    /// Every selected entry of the full collection, visible or not.
    ///
    /// Entries are ordered by the current sort keys, falling back to input
    /// order. This is the snapshot handed to a study session.
    #[must_use]
    pub fn selected_entries(&self, selection: &SelectionStore) -> Vec<Entry> {
        let mut rows: Vec<&Entry> = self
            .entries
            .iter()
            .filter(|entry| selection.is_selected(entry.id))
            .collect();
        self.sort.sort(&mut rows);
        rows.into_iter().cloned().collect()
    }

    /// Distinct values of `column` for a multi-select filter.
    #[must_use]
    pub fn membership_options(&self, column: ColumnId) -> Vec<String> {
        FilterPredicateSet::membership_options(column, &self.entries)
    }

    fn max_index(&self) -> usize {
        self.visible.len().saturating_sub(1)
    }

    fn refresh(&mut self) {
        let mut rows: Vec<(usize, &Entry)> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| self.filters.passes_all(entry))
            .collect();
        if !self.sort.is_empty() {
            rows.sort_by(|(_, left), (_, right)| self.sort.compare(left, right));
        }
        self.visible = rows.into_iter().map(|(index, _)| index).collect();
        self.cursor.clamp(self.visible.len());
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
