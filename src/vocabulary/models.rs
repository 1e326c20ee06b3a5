//! Vocabulary entry model shared by the table view and the study session.
//!
//! Entries are owned by the backend collaborator; the core only ever holds
//! copies, so every type here is a plain value with `Clone`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Flag state of an entry, persisted as the integers `0` and `1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum FlagValue {
    /// The entry is not flagged (`0`).
    #[default]
    Unflagged,
    /// The entry is flagged for attention (`1`).
    Flagged,
}

impl FlagValue {
    /// Returns the opposite flag value.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Unflagged => Self::Flagged,
            Self::Flagged => Self::Unflagged,
        }
    }

    /// Returns the integer stored in the database.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        match self {
            Self::Unflagged => 0,
            Self::Flagged => 1,
        }
    }

    /// Returns true for [`FlagValue::Flagged`].
    #[must_use]
    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

impl TryFrom<i64> for FlagValue {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unflagged),
            1 => Ok(Self::Flagged),
            other => Err(format!("flag must be 0 or 1, got {other}")),
        }
    }
}

impl From<FlagValue> for i64 {
    fn from(value: FlagValue) -> Self {
        value.as_i64()
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}

/// One row of the vocabulary dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique, immutable identity assigned by the backend.
    #[serde(rename = "vocab_id")]
    pub id: i64,
    /// Source word (English).
    pub english: Option<String>,
    /// Phonetic gloss of the translation.
    pub furigana: Option<String>,
    /// Translation (Japanese).
    pub japanese: Option<String>,
    /// Number of times the entry has been studied.
    pub times_seen: i64,
    /// Recent miss rate as a percentage.
    pub recently_missed_percent: f64,
    /// Whether the entry is flagged.
    pub flag: FlagValue,
    /// Notes shared with other learners.
    pub public_notes: Option<String>,
    /// Private notes.
    pub personal_notes: Option<String>,
    /// Textbook the entry comes from.
    pub book: Option<String>,
    /// Chapter within the book.
    pub chapter: i64,
    /// Section within the chapter.
    pub section: i64,
    /// Word category (noun, verb, ...).
    pub word_category: Option<String>,
}

impl Entry {
    /// Name used in user-facing messages: the English word, or `Item <id>`.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.english
            .clone()
            .unwrap_or_else(|| format!("Item {}", self.id))
    }
}

/// Field values for an entry that does not have an identity yet.
///
/// Produced by the TSV importer; the backend assigns the id on insert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewEntry {
    /// Source word (English).
    pub english: Option<String>,
    /// Phonetic gloss of the translation.
    pub furigana: Option<String>,
    /// Translation (Japanese).
    pub japanese: Option<String>,
    /// Number of times the entry has been studied.
    pub times_seen: i64,
    /// Recent miss rate as a percentage.
    pub recently_missed_percent: f64,
    /// Whether the entry is flagged.
    pub flag: FlagValue,
    /// Notes shared with other learners.
    pub public_notes: Option<String>,
    /// Private notes.
    pub personal_notes: Option<String>,
    /// Textbook the entry comes from.
    pub book: Option<String>,
    /// Chapter within the book.
    pub chapter: i64,
    /// Section within the chapter.
    pub section: i64,
    /// Word category.
    pub word_category: Option<String>,
}

/// Result of a successful bulk import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Number of entries created.
    pub inserted: usize,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inserted {
            1 => write!(f, "Imported 1 entry"),
            count => write!(f, "Imported {count} entries"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(FlagValue::Unflagged, FlagValue::Flagged)]
    #[case(FlagValue::Flagged, FlagValue::Unflagged)]
    fn toggled_flips_flag(#[case] input: FlagValue, #[case] expected: FlagValue) {
        assert_eq!(input.toggled(), expected);
    }

    #[test]
    fn flag_rejects_out_of_range_integers() {
        assert!(FlagValue::try_from(2).is_err());
        assert_eq!(FlagValue::try_from(1), Ok(FlagValue::Flagged));
    }

    #[test]
    fn entry_deserialises_from_backend_shape() {
        let json = r#"{
            "vocab_id": 7,
            "english": "cat",
            "furigana": "ねこ",
            "japanese": "猫",
            "times_seen": 3,
            "recently_missed_percent": 12.5,
            "flag": 1,
            "public_notes": null,
            "personal_notes": null,
            "book": "Genki I",
            "chapter": 2,
            "section": 1,
            "word_category": "noun"
        }"#;

        let entry: Entry = serde_json::from_str(json).expect("entry should parse");

        assert_eq!(entry.id, 7);
        assert_eq!(entry.flag, FlagValue::Flagged);
        assert_eq!(entry.book.as_deref(), Some("Genki I"));
    }

    #[test]
    fn display_name_falls_back_to_item_id() {
        let entry = Entry {
            id: 42,
            ..Entry::default()
        };
        assert_eq!(entry.display_name(), "Item 42");
    }

    #[rstest]
    #[case(1, "Imported 1 entry")]
    #[case(3, "Imported 3 entries")]
    fn import_summary_reads_naturally(#[case] inserted: usize, #[case] expected: &str) {
        assert_eq!(ImportSummary { inserted }.to_string(), expected);
    }
}
