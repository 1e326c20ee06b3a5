//! Shared view-mode and layout constants for the vocabulary TUI.

use crate::tui::state::{FilterEditor, FinderNav, MembershipPicker};

/// Rows reserved for the header, filter bar, table header, and status bar.
pub(crate) const CHROME_HEIGHT: usize = 4;
/// Minimum rows for the table body, so at least one row is always drawn.
pub(crate) const MIN_TABLE_HEIGHT: usize = 1;

/// Which view is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ViewMode {
    Table,
    Study,
}

/// Overlay drawn on top of the table, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum Overlay {
    #[default]
    None,
    FilterInput(FilterEditor),
    Membership(MembershipPicker),
    ColumnFinder(FinderNav),
}
