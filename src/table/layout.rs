//! Column visibility and width state.
//!
//! Widths are terminal cells. The row-selection checkbox column is fixed: it
//! cannot be hidden, sorted, or resized, so it has no [`ColumnLayout`].

use super::columns::ColumnId;

/// Width of the fixed row-selection column, in cells.
pub const SELECT_COLUMN_WIDTH: u16 = 4;

const DEFAULT_MIN_SIZE: u16 = 3;
const DEFAULT_MAX_SIZE: u16 = 80;

/// Visibility and sizing for one data column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Column described by this layout.
    pub column: ColumnId,
    /// Whether the column is drawn.
    pub visible: bool,
    /// Current width.
    pub size: u16,
    /// Smallest allowed width.
    pub min_size: u16,
    /// Largest allowed width.
    pub max_size: u16,
}

impl ColumnLayout {
    const fn new(column: ColumnId, size: u16, min_size: u16) -> Self {
        Self {
            column,
            visible: true,
            size,
            min_size,
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    const fn default_for(column: ColumnId) -> Self {
        match column {
            ColumnId::English | ColumnId::Japanese => Self::new(column, 12, 4),
            ColumnId::Furigana | ColumnId::WordCategory | ColumnId::RecentlyMissedPercent => {
                Self::new(column, 12, DEFAULT_MIN_SIZE)
            }
            ColumnId::Chapter | ColumnId::Section | ColumnId::TimesSeen => {
                Self::new(column, 9, DEFAULT_MIN_SIZE)
            }
            ColumnId::Flag => Self::new(column, 6, DEFAULT_MIN_SIZE),
            ColumnId::Book => Self::new(column, 15, DEFAULT_MIN_SIZE),
            ColumnId::PublicNotes | ColumnId::PersonalNotes => {
                Self::new(column, 25, DEFAULT_MIN_SIZE)
            }
        }
    }
}

/// Layout of every data column in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    columns: Vec<ColumnLayout>,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            columns: ColumnId::ALL
                .into_iter()
                .map(ColumnLayout::default_for)
                .collect(),
        }
    }
}

impl TableLayout {
    /// Layout for `column`.
    #[must_use]
    pub fn get(&self, column: ColumnId) -> Option<&ColumnLayout> {
        self.columns.iter().find(|layout| layout.column == column)
    }

    fn get_mut(&mut self, column: ColumnId) -> Option<&mut ColumnLayout> {
        self.columns
            .iter_mut()
            .find(|layout| layout.column == column)
    }

    /// Returns true when `column` is drawn.
    #[must_use]
    pub fn is_visible(&self, column: ColumnId) -> bool {
        self.get(column).is_some_and(|layout| layout.visible)
    }

    /// Shows or hides `column`. Filters on the column are unaffected.
    pub fn set_visible(&mut self, column: ColumnId, visible: bool) {
        if let Some(layout) = self.get_mut(column) {
            layout.visible = visible;
        }
    }

    /// Sets the width of `column`, clamped to its bounds.
    ///
    /// Returns the width actually applied.
    pub fn resize(&mut self, column: ColumnId, width: u16) -> Option<u16> {
        let layout = self.get_mut(column)?;
        layout.size = width.clamp(layout.min_size, layout.max_size);
        Some(layout.size)
    }

    /// Grows or shrinks `column` by `delta` cells, clamped to its bounds.
    pub fn resize_by(&mut self, column: ColumnId, delta: i16) -> Option<u16> {
        let current = self.get(column)?.size;
        self.resize(column, current.saturating_add_signed(delta))
    }

    /// Visible columns in display order.
    pub fn visible_columns(&self) -> impl Iterator<Item = &ColumnLayout> {
        self.columns.iter().filter(|layout| layout.visible)
    }

    /// Total width of the visible columns plus the selection column.
    #[must_use]
    pub fn total_width(&self) -> u16 {
        self.visible_columns()
            .fold(SELECT_COLUMN_WIDTH, |total, layout| {
                total.saturating_add(layout.size).saturating_add(1)
            })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn every_column_starts_visible() {
        let layout = TableLayout::default();

        assert_eq!(layout.visible_columns().count(), ColumnId::ALL.len());
    }

    #[rstest]
    #[case(0, 4)]
    #[case(20, 20)]
    #[case(500, 80)]
    fn resize_clamps_to_bounds(#[case] requested: u16, #[case] expected: u16) {
        let mut layout = TableLayout::default();

        assert_eq!(layout.resize(ColumnId::English, requested), Some(expected));
        assert_eq!(
            layout.get(ColumnId::English).map(|column| column.size),
            Some(expected)
        );
    }

    #[test]
    fn resize_by_saturates_below_minimum() {
        let mut layout = TableLayout::default();

        assert_eq!(layout.resize_by(ColumnId::Flag, -100), Some(3));
        assert_eq!(layout.resize_by(ColumnId::Flag, 2), Some(5));
    }

    #[test]
    fn hidden_columns_leave_the_visible_set() {
        let mut layout = TableLayout::default();
        layout.set_visible(ColumnId::PublicNotes, false);

        assert!(!layout.is_visible(ColumnId::PublicNotes));
        assert!(
            layout
                .visible_columns()
                .all(|column| column.column != ColumnId::PublicNotes)
        );
    }
}
