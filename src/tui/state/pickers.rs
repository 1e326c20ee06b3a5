//! Cursor state for the membership picker and column finder overlays.

use crate::table::{ColumnFinder, ColumnId, ColumnNode};

/// Multi-select list of a column's distinct values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipPicker {
    column: ColumnId,
    options: Vec<String>,
    cursor: usize,
}

impl MembershipPicker {
    /// Opens a picker over `options` for `column`.
    #[must_use]
    pub const fn new(column: ColumnId, options: Vec<String>) -> Self {
        Self {
            column,
            options,
            cursor: 0,
        }
    }

    /// Column being filtered.
    #[must_use]
    pub const fn column(&self) -> ColumnId {
        self.column
    }

    /// Distinct values offered.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Highlighted row.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Value under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.options.get(self.cursor).map(String::as_str)
    }

    /// Moves the highlight up.
    pub const fn up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the highlight down.
    pub fn down(&mut self) {
        if self.cursor.saturating_add(1) < self.options.len() {
            self.cursor = self.cursor.saturating_add(1);
        }
    }
}

/// Highlighted node in the column finder.
///
/// The finder itself records which node is selected on each level; this
/// tracks the level being browsed and the row highlighted on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinderNav {
    level: usize,
    row: usize,
}

impl FinderNav {
    /// Level being browsed.
    #[must_use]
    pub const fn level(self) -> usize {
        self.level
    }

    /// Highlighted row on the browsed level.
    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    /// Node under the highlight.
    #[must_use]
    pub fn current(self, finder: &ColumnFinder) -> Option<&ColumnNode> {
        finder
            .nodes_at(self.level)
            .and_then(|nodes| nodes.get(self.row))
    }

    /// Moves the highlight up.
    pub const fn up(&mut self) {
        self.row = self.row.saturating_sub(1);
    }

    /// Moves the highlight down within the browsed level.
    pub fn down(&mut self, finder: &ColumnFinder) {
        let len = finder.nodes_at(self.level).map_or(0, <[ColumnNode]>::len);
        if self.row.saturating_add(1) < len {
            self.row = self.row.saturating_add(1);
        }
    }

    /// Selects the highlighted node; groups open their children.
    ///
    /// Returns true when a new level was entered.
    pub fn enter(&mut self, finder: &mut ColumnFinder) -> bool {
        let Some((id, is_group)) = self
            .current(finder)
            .map(|node| (node.id().to_owned(), node.is_group()))
        else {
            return false;
        };
        if !finder.select(self.level, &id) || !is_group {
            return false;
        }
        self.level = self.level.saturating_add(1);
        self.row = 0;
        true
    }

    /// Returns to the parent level, highlighting the node that was open.
    pub fn back(&mut self, finder: &ColumnFinder) -> bool {
        if self.level == 0 {
            return false;
        }
        self.level = self.level.saturating_sub(1);
        let open = finder.selected_path().get(self.level);
        self.row = finder
            .nodes_at(self.level)
            .zip(open)
            .and_then(|(nodes, id)| nodes.iter().position(|node| node.id() == id))
            .unwrap_or(0);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{FinderNav, MembershipPicker};
    use crate::table::{ColumnFinder, ColumnId};

    #[test]
    fn picker_cursor_stays_in_bounds() {
        let mut picker = MembershipPicker::new(
            ColumnId::Book,
            vec!["Genki I".to_owned(), "Genki II".to_owned()],
        );

        picker.up();
        assert_eq!(picker.current(), Some("Genki I"));
        picker.down();
        picker.down();
        assert_eq!(picker.current(), Some("Genki II"));
    }

    #[test]
    fn finder_nav_enters_groups_and_returns() {
        let mut finder = ColumnFinder::default();
        let mut nav = FinderNav::default();
        let book_row = finder
            .nodes_at(0)
            .and_then(|nodes| nodes.iter().position(|node| node.id() == "col-book"))
            .expect("default hierarchy has a book group");
        for _ in 0..book_row {
            nav.down(&finder);
        }

        assert!(nav.enter(&mut finder));
        assert_eq!(nav.level(), 1);
        assert_eq!(nav.current(&finder).map(|node| node.id()), Some("col-chapter"));

        assert!(nav.back(&finder));
        assert_eq!((nav.level(), nav.row()), (0, book_row));
        assert!(!nav.back(&finder));
    }

    #[test]
    fn entering_a_leaf_stays_on_level() {
        let mut finder = ColumnFinder::default();
        let mut nav = FinderNav::default();

        assert!(!nav.enter(&mut finder));

        assert_eq!(nav.level(), 0);
        assert_eq!(finder.selected_path(), ["col-english".to_owned()]);
    }
}
