//! Single-line text input used to edit a filter in place.

use crate::table::{ColumnId, FilterKind};

/// Which predicate the editor writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterTarget {
    /// The free-text search over every field.
    Global,
    /// A text or integer-set predicate on one column.
    Column(ColumnId),
}

impl FilterTarget {
    /// Prompt shown before the input buffer.
    #[must_use]
    pub fn prompt(self) -> String {
        match self {
            Self::Global => "Search".to_owned(),
            Self::Column(column) => format!("Filter {}", column.header()),
        }
    }

    /// Returns true when edits should wait for the debounce timer.
    #[must_use]
    pub fn is_debounced(self) -> bool {
        matches!(
            self,
            Self::Column(column) if column.filter_kind() == FilterKind::IntegerSet
        )
    }
}

/// Text being typed into a filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEditor {
    target: FilterTarget,
    buffer: String,
}

impl FilterEditor {
    /// Opens an editor for `target` pre-filled with `initial`.
    #[must_use]
    pub fn open(target: FilterTarget, initial: impl Into<String>) -> Self {
        Self {
            target,
            buffer: initial.into(),
        }
    }

    /// Predicate being edited.
    #[must_use]
    pub const fn target(&self) -> FilterTarget {
        self.target
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Appends a typed character.
    pub fn push(&mut self, ch: char) {
        self.buffer.push(ch);
    }

    /// Deletes the last character. Returns false when already empty.
    pub fn backspace(&mut self) -> bool {
        self.buffer.pop().is_some()
    }
}
