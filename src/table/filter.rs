//! Column and global filter predicates.
//!
//! A [`FilterPredicateSet`] holds at most one predicate per column plus an
//! optional global free-text predicate. An entry is visible when it passes
//! all of them. Predicates are independent of column visibility.

use std::collections::{BTreeMap, BTreeSet};

use super::columns::{CellValue, ColumnId};
use super::integer_set::IntegerSet;
use crate::vocabulary::Entry;

/// Separator between fields in the global search haystack.
///
/// Input boxes are single-line, so a query can never span two fields.
const FIELD_SEPARATOR: &str = "\n";

/// Predicate attached to a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnPredicate {
    /// Case-insensitive substring of the cell text.
    Substring {
        /// Text as typed by the user.
        raw: String,
        /// Lower-cased needle.
        needle: String,
    },
    /// Cell text must be one of the accepted values.
    Membership(BTreeSet<String>),
    /// Integer cell must lie in the parsed set.
    IntegerSet {
        /// Spec text as typed, kept for redrawing the input.
        raw: String,
        /// Parsed members; `None` accepts every row.
        parsed: Option<IntegerSet>,
    },
}

impl ColumnPredicate {
    /// Returns true when `entry` passes this predicate on `column`.
    #[must_use]
    pub fn matches(&self, column: ColumnId, entry: &Entry) -> bool {
        match self {
            Self::Substring { needle, .. } => column
                .raw_text(entry)
                .is_some_and(|text| text.to_lowercase().contains(needle.as_str())),
            Self::Membership(accepted) => column
                .raw_text(entry)
                .is_some_and(|text| accepted.contains(&text)),
            Self::IntegerSet { parsed, .. } => {
                let Some(set) = parsed else {
                    return true;
                };
                match column.value(entry) {
                    CellValue::Integer(value) => set.contains(value),
                    CellValue::Text(_) | CellValue::Float(_) => false,
                }
            }
        }
    }

    /// Text shown in the header input for this predicate.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Substring { raw, .. } | Self::IntegerSet { raw, .. } => raw.clone(),
            Self::Membership(accepted) => accepted
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Conjunction of per-column predicates and a global text predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPredicateSet {
    columns: BTreeMap<ColumnId, ColumnPredicate>,
    global: Option<String>,
}

impl FilterPredicateSet {
    /// Creates an empty set that accepts every entry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when no predicate is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.global.is_none()
    }

    /// Predicate on `column`, if any.
    #[must_use]
    pub fn predicate(&self, column: ColumnId) -> Option<&ColumnPredicate> {
        self.columns.get(&column)
    }

    /// Active global query text.
    #[must_use]
    pub fn global(&self) -> Option<&str> {
        self.global.as_deref()
    }

    /// Number of columns carrying a predicate.
    #[must_use]
    pub fn active_column_count(&self) -> usize {
        self.columns.len()
    }

    /// Sets a substring predicate; blank text clears the column.
    pub fn set_substring(&mut self, column: ColumnId, text: &str) {
        if text.trim().is_empty() {
            self.clear_column(column);
            return;
        }
        self.columns.insert(
            column,
            ColumnPredicate::Substring {
                raw: text.to_owned(),
                needle: text.to_lowercase(),
            },
        );
    }

    /// Replaces the accepted values of `column`; an empty set clears it.
    pub fn set_membership<I>(&mut self, column: ColumnId, values: I)
    where
        I: IntoIterator<Item = String>,
    {
        let accepted: BTreeSet<String> = values.into_iter().collect();
        if accepted.is_empty() {
            self.clear_column(column);
        } else {
            self.columns
                .insert(column, ColumnPredicate::Membership(accepted));
        }
    }

    /// Adds `value` to, or removes it from, the accepted values of `column`.
    ///
    /// Removing the last value clears the predicate. Any non-membership
    /// predicate on the column is replaced.
    pub fn toggle_membership_value(&mut self, column: ColumnId, value: &str) {
        let mut accepted = match self.columns.remove(&column) {
            Some(ColumnPredicate::Membership(accepted)) => accepted,
            _ => BTreeSet::new(),
        };
        if !accepted.remove(value) {
            accepted.insert(value.to_owned());
        }
        self.set_membership(column, accepted);
    }

    /// Sets an integer-set predicate from its textual spec.
    ///
    /// Blank text clears the column. Unparseable text is kept so the input
    /// can be redrawn, but it imposes no constraint.
    pub fn set_integer_set(&mut self, column: ColumnId, spec: &str) {
        if spec.trim().is_empty() {
            self.clear_column(column);
            return;
        }
        self.columns.insert(
            column,
            ColumnPredicate::IntegerSet {
                raw: spec.to_owned(),
                parsed: IntegerSet::parse(spec),
            },
        );
    }

    /// Sets the global query; blank text clears it.
    pub fn set_global(&mut self, text: &str) {
        self.global = (!text.trim().is_empty()).then(|| text.to_lowercase());
    }

    /// Removes the predicate on `column`.
    pub fn clear_column(&mut self, column: ColumnId) {
        self.columns.remove(&column);
    }

    /// Removes every predicate, including the global query.
    pub fn clear_all(&mut self) {
        self.columns.clear();
        self.global = None;
    }

    /// Returns true when `entry` passes every active predicate.
    #[must_use]
    pub fn passes_all(&self, entry: &Entry) -> bool {
        self.columns
            .iter()
            .all(|(column, predicate)| predicate.matches(*column, entry))
            && self
                .global
                .as_deref()
                .is_none_or(|query| search_text(entry).contains(query))
    }

    /// Distinct values of `column` across `entries`, sorted for display.
    ///
    /// Numeric columns sort numerically. Missing values are omitted.
    #[must_use]
    pub fn membership_options(column: ColumnId, entries: &[Entry]) -> Vec<String> {
        let mut options: Vec<(CellValue<'_>, String)> = Vec::new();
        for entry in entries {
            let Some(text) = column.raw_text(entry) else {
                continue;
            };
            if options.iter().any(|(_, existing)| *existing == text) {
                continue;
            }
            options.push((column.value(entry), text));
        }
        options.sort_by(|(left, _), (right, _)| left.compare(right));
        options.into_iter().map(|(_, text)| text).collect()
    }
}

/// Lower-cased concatenation of every column's raw text.
fn search_text(entry: &Entry) -> String {
    ColumnId::ALL
        .into_iter()
        .filter_map(|column| column.raw_text(entry))
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR)
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    fn entry(id: i64, english: &str, chapter: i64, category: Option<&str>) -> Entry {
        Entry {
            id,
            english: Some(english.to_owned()),
            chapter,
            word_category: category.map(ToOwned::to_owned),
            ..Entry::default()
        }
    }

    #[fixture]
    fn entries() -> Vec<Entry> {
        vec![
            entry(1, "Cat", 1, Some("noun")),
            entry(2, "run", 5, Some("verb")),
            entry(3, "Catch", 8, Some("verb")),
            entry(4, "blue", 9, None),
        ]
    }

    fn visible_ids(filters: &FilterPredicateSet, entries: &[Entry]) -> Vec<i64> {
        entries
            .iter()
            .filter(|entry| filters.passes_all(entry))
            .map(|entry| entry.id)
            .collect()
    }

    #[rstest]
    fn empty_set_accepts_everything(entries: Vec<Entry>) {
        let filters = FilterPredicateSet::new();

        assert!(filters.is_empty());
        assert_eq!(visible_ids(&filters, &entries), vec![1, 2, 3, 4]);
    }

    #[rstest]
    fn substring_is_case_insensitive(entries: Vec<Entry>) {
        let mut filters = FilterPredicateSet::new();
        filters.set_substring(ColumnId::English, "CAT");

        assert_eq!(visible_ids(&filters, &entries), vec![1, 3]);
    }

    #[rstest]
    fn predicates_combine_as_conjunction(entries: Vec<Entry>) {
        let mut filters = FilterPredicateSet::new();
        filters.set_substring(ColumnId::English, "cat");
        filters.set_integer_set(ColumnId::Chapter, "1-5, 8");
        filters.set_membership(ColumnId::WordCategory, ["verb".to_owned()]);

        assert_eq!(visible_ids(&filters, &entries), vec![3]);
    }

    #[rstest]
    #[case("1-5, 8", vec![1, 2, 3])]
    #[case("abc", vec![1, 2, 3, 4])]
    #[case("5-3", vec![1, 2, 3, 4])]
    #[case("5-3, 8", vec![3])]
    fn integer_set_filters_chapter(
        entries: Vec<Entry>,
        #[case] spec: &str,
        #[case] expected: Vec<i64>,
    ) {
        let mut filters = FilterPredicateSet::new();
        filters.set_integer_set(ColumnId::Chapter, spec);

        assert_eq!(visible_ids(&filters, &entries), expected);
        assert_eq!(
            filters
                .predicate(ColumnId::Chapter)
                .map(ColumnPredicate::label),
            Some(spec.to_owned())
        );
    }

    #[rstest]
    fn membership_never_matches_missing_values(entries: Vec<Entry>) {
        let mut filters = FilterPredicateSet::new();
        filters.toggle_membership_value(ColumnId::WordCategory, "noun");
        filters.toggle_membership_value(ColumnId::WordCategory, "verb");

        assert_eq!(visible_ids(&filters, &entries), vec![1, 2, 3]);
    }

    #[test]
    fn toggling_last_membership_value_clears_predicate() {
        let mut filters = FilterPredicateSet::new();
        filters.toggle_membership_value(ColumnId::Book, "Genki I");
        filters.toggle_membership_value(ColumnId::Book, "Genki I");

        assert!(filters.predicate(ColumnId::Book).is_none());
    }

    #[rstest]
    fn global_query_searches_every_field(entries: Vec<Entry>) {
        let mut filters = FilterPredicateSet::new();
        filters.set_global("VERB");

        assert_eq!(visible_ids(&filters, &entries), vec![2, 3]);

        filters.set_global("9");
        assert_eq!(visible_ids(&filters, &entries), vec![4]);
    }

    #[rstest]
    fn global_query_does_not_span_fields(entries: Vec<Entry>) {
        let mut filters = FilterPredicateSet::new();
        filters.set_global("cat1");

        assert!(visible_ids(&filters, &entries).is_empty());
    }

    #[rstest]
    fn blank_inputs_clear_predicates(entries: Vec<Entry>) {
        let mut filters = FilterPredicateSet::new();
        filters.set_substring(ColumnId::English, "cat");
        filters.set_global("noun");
        filters.set_substring(ColumnId::English, "  ");
        filters.set_global("");

        assert!(filters.is_empty());
        assert_eq!(visible_ids(&filters, &entries).len(), 4);
    }

    #[test]
    fn clear_all_removes_every_predicate() {
        let mut filters = FilterPredicateSet::new();
        filters.set_substring(ColumnId::English, "cat");
        filters.set_integer_set(ColumnId::Section, "2");
        filters.set_global("x");

        filters.clear_all();

        assert!(filters.is_empty());
        assert_eq!(filters.active_column_count(), 0);
    }

    #[rstest]
    fn membership_options_are_distinct_and_sorted(entries: Vec<Entry>) {
        let mut extended = entries;
        extended.push(entry(5, "walk", 10, Some("verb")));

        assert_eq!(
            FilterPredicateSet::membership_options(ColumnId::WordCategory, &extended),
            vec!["noun".to_owned(), "verb".to_owned()]
        );
        assert_eq!(
            FilterPredicateSet::membership_options(ColumnId::Chapter, &extended),
            vec!["1", "5", "8", "9", "10"]
        );
    }
}
