//! Column identities and typed cell access for vocabulary entries.

use std::cmp::Ordering;

use crate::vocabulary::Entry;

/// Placeholder shown for missing text values.
pub const MISSING_TEXT: &str = "N/A";

/// A data column of the vocabulary table.
///
/// The row-selection checkbox column is not a data column; see
/// [`super::layout::SELECT_COLUMN_WIDTH`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColumnId {
    /// Source word.
    English,
    /// Translation.
    Japanese,
    /// Phonetic gloss.
    Furigana,
    /// Chapter number.
    Chapter,
    /// Word category.
    WordCategory,
    /// Times studied.
    TimesSeen,
    /// Recent miss rate.
    RecentlyMissedPercent,
    /// Flag state.
    Flag,
    /// Source textbook.
    Book,
    /// Section number.
    Section,
    /// Shared notes.
    PublicNotes,
    /// Private notes.
    PersonalNotes,
}

/// How a column is filtered from its header input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Free text, case-insensitive substring.
    Substring,
    /// Multi-select over the column's distinct values.
    Membership,
    /// Integer list and range expression such as `1-5, 8`.
    IntegerSet,
}

/// Typed cell value used for comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    /// Optional text.
    Text(Option<&'a str>),
    /// Integer column.
    Integer(i64),
    /// Floating-point column.
    Float(f64),
}

impl CellValue<'_> {
    /// Returns true when the cell has no value.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Text(None))
    }

    /// Compares two present values of the same column.
    ///
    /// Text compares ordinally, numbers numerically. Missing values compare
    /// equal here; callers place them last before applying a direction.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(Some(left)), Self::Text(Some(right))) => left.cmp(right),
            (Self::Integer(left), Self::Integer(right)) => left.cmp(right),
            (Self::Float(left), Self::Float(right)) => left.total_cmp(right),
            _ => Ordering::Equal,
        }
    }
}

impl ColumnId {
    /// Every data column in default display order.
    pub const ALL: [Self; 12] = [
        Self::English,
        Self::Japanese,
        Self::Furigana,
        Self::Chapter,
        Self::WordCategory,
        Self::TimesSeen,
        Self::RecentlyMissedPercent,
        Self::Flag,
        Self::Book,
        Self::Section,
        Self::PublicNotes,
        Self::PersonalNotes,
    ];

    /// Stable textual key, matching the entry's serialised field name.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Japanese => "japanese",
            Self::Furigana => "furigana",
            Self::Chapter => "chapter",
            Self::WordCategory => "word_category",
            Self::TimesSeen => "times_seen",
            Self::RecentlyMissedPercent => "recently_missed_percent",
            Self::Flag => "flag",
            Self::Book => "book",
            Self::Section => "section",
            Self::PublicNotes => "public_notes",
            Self::PersonalNotes => "personal_notes",
        }
    }

    /// Resolves a textual key against the live column set.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.key() == key)
    }

    /// Header label.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Japanese => "Japanese",
            Self::Furigana => "Furigana",
            Self::Chapter => "Chapter",
            Self::WordCategory => "Category",
            Self::TimesSeen => "Seen",
            Self::RecentlyMissedPercent => "Missed %",
            Self::Flag => "Flag",
            Self::Book => "Book",
            Self::Section => "Section",
            Self::PublicNotes => "Public Notes",
            Self::PersonalNotes => "Personal Notes",
        }
    }

    /// Filter editor offered in the column header.
    #[must_use]
    pub const fn filter_kind(self) -> FilterKind {
        match self {
            Self::Chapter | Self::Section | Self::TimesSeen => FilterKind::IntegerSet,
            Self::WordCategory | Self::Book | Self::Flag => FilterKind::Membership,
            Self::English
            | Self::Japanese
            | Self::Furigana
            | Self::RecentlyMissedPercent
            | Self::PublicNotes
            | Self::PersonalNotes => FilterKind::Substring,
        }
    }

    /// Returns the typed value of this column for `entry`.
    #[must_use]
    pub fn value(self, entry: &Entry) -> CellValue<'_> {
        match self {
            Self::English => CellValue::Text(entry.english.as_deref()),
            Self::Japanese => CellValue::Text(entry.japanese.as_deref()),
            Self::Furigana => CellValue::Text(entry.furigana.as_deref()),
            Self::WordCategory => CellValue::Text(entry.word_category.as_deref()),
            Self::Book => CellValue::Text(entry.book.as_deref()),
            Self::PublicNotes => CellValue::Text(entry.public_notes.as_deref()),
            Self::PersonalNotes => CellValue::Text(entry.personal_notes.as_deref()),
            Self::Chapter => CellValue::Integer(entry.chapter),
            Self::Section => CellValue::Integer(entry.section),
            Self::TimesSeen => CellValue::Integer(entry.times_seen),
            Self::Flag => CellValue::Integer(entry.flag.as_i64()),
            Self::RecentlyMissedPercent => CellValue::Float(entry.recently_missed_percent),
        }
    }

    /// Raw text of the cell, or `None` when the value is missing.
    ///
    /// This is what filters match against.
    #[must_use]
    pub fn raw_text(self, entry: &Entry) -> Option<String> {
        match self.value(entry) {
            CellValue::Text(text) => text.map(ToOwned::to_owned),
            CellValue::Integer(value) => Some(value.to_string()),
            CellValue::Float(value) => Some(format_percent(value)),
        }
    }

    /// Text rendered in a table cell.
    #[must_use]
    pub fn display_text(self, entry: &Entry) -> String {
        self.raw_text(entry)
            .unwrap_or_else(|| MISSING_TEXT.to_owned())
    }
}

fn format_percent(value: f64) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::vocabulary::FlagValue;

    fn sample() -> Entry {
        Entry {
            id: 1,
            english: Some("cat".to_owned()),
            chapter: 3,
            recently_missed_percent: 12.5,
            flag: FlagValue::Flagged,
            ..Entry::default()
        }
    }

    #[test]
    fn every_column_key_round_trips() {
        for column in ColumnId::ALL {
            assert_eq!(ColumnId::from_key(column.key()), Some(column));
        }
        assert_eq!(ColumnId::from_key("select"), None);
    }

    #[rstest]
    #[case(ColumnId::English, "cat")]
    #[case(ColumnId::Japanese, "N/A")]
    #[case(ColumnId::Chapter, "3")]
    #[case(ColumnId::RecentlyMissedPercent, "12.50")]
    #[case(ColumnId::Flag, "1")]
    fn display_text_formats_cells(#[case] column: ColumnId, #[case] expected: &str) {
        assert_eq!(column.display_text(&sample()), expected);
    }

    #[test]
    fn missing_text_has_no_raw_value() {
        assert_eq!(ColumnId::Book.raw_text(&sample()), None);
        assert!(ColumnId::Book.value(&sample()).is_missing());
    }
}
