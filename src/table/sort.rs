//! Multi-column sort order.

use std::cmp::Ordering;

use super::columns::ColumnId;
use crate::vocabulary::Entry;

/// Direction of a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Arrow drawn next to a sorted header.
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// One `(column, direction)` pair of a [`SortSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    /// Column compared by this key.
    pub column: ColumnId,
    /// Direction applied to the comparison.
    pub direction: SortDirection,
}

/// Ordered list of sort keys; earlier keys take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    /// Creates an empty spec that preserves input order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a spec from explicit keys.
    #[must_use]
    pub fn from_keys(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    /// Keys in precedence order.
    #[must_use]
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Returns true when no key is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Direction applied to `column`, if it is sorted.
    #[must_use]
    pub fn direction_of(&self, column: ColumnId) -> Option<SortDirection> {
        self.keys
            .iter()
            .find(|key| key.column == column)
            .map(|key| key.direction)
    }

    /// Cycles `column` through unsorted, ascending, and descending.
    ///
    /// Without `multi` the key list is replaced by the column's next state. With
    /// `multi` the column is updated in place, appended when new, or removed
    /// when it cycles back to unsorted.
    pub fn toggle(&mut self, column: ColumnId, multi: bool) {
        let next = match self.direction_of(column) {
            None => Some(SortDirection::Ascending),
            Some(SortDirection::Ascending) => Some(SortDirection::Descending),
            Some(SortDirection::Descending) => None,
        };

        if !multi {
            self.keys = next
                .map(|direction| vec![SortKey { column, direction }])
                .unwrap_or_default();
            return;
        }

        match (self.keys.iter().position(|key| key.column == column), next) {
            (Some(index), Some(direction)) => {
                if let Some(key) = self.keys.get_mut(index) {
                    key.direction = direction;
                }
            }
            (Some(index), None) => {
                self.keys.remove(index);
            }
            (None, Some(direction)) => self.keys.push(SortKey { column, direction }),
            (None, None) => {}
        }
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Compares two entries by every key in order.
    ///
    /// Missing values sort last regardless of direction.
    #[must_use]
    pub fn compare(&self, left: &Entry, right: &Entry) -> Ordering {
        for key in &self.keys {
            let left_value = key.column.value(left);
            let right_value = key.column.value(right);
            let ordering = match (left_value.is_missing(), right_value.is_missing()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => {
                    let natural = left_value.compare(&right_value);
                    match key.direction {
                        SortDirection::Ascending => natural,
                        SortDirection::Descending => natural.reverse(),
                    }
                }
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Stable-sorts `rows` in place; ties keep their input order.
    pub fn sort(&self, rows: &mut [&Entry]) {
        if self.keys.is_empty() {
            return;
        }
        rows.sort_by(|left, right| self.compare(left, right));
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn entry(id: i64, english: Option<&str>, chapter: i64) -> Entry {
        Entry {
            id,
            english: english.map(ToOwned::to_owned),
            chapter,
            ..Entry::default()
        }
    }

    fn sorted_ids(spec: &SortSpec, entries: &[Entry]) -> Vec<i64> {
        let mut rows: Vec<&Entry> = entries.iter().collect();
        spec.sort(&mut rows);
        rows.iter().map(|entry| entry.id).collect()
    }

    fn key(column: ColumnId, direction: SortDirection) -> SortKey {
        SortKey { column, direction }
    }

    #[test]
    fn empty_spec_preserves_input_order() {
        let entries = vec![entry(3, Some("c"), 1), entry(1, Some("a"), 1)];

        assert_eq!(sorted_ids(&SortSpec::new(), &entries), vec![3, 1]);
    }

    #[rstest]
    #[case(SortDirection::Ascending, vec![2, 1, 4, 3])]
    #[case(SortDirection::Descending, vec![1, 4, 2, 3])]
    fn missing_values_sort_last_in_both_directions(
        #[case] direction: SortDirection,
        #[case] expected: Vec<i64>,
    ) {
        let entries = vec![
            entry(1, Some("b"), 0),
            entry(2, Some("a"), 0),
            entry(3, None, 0),
            entry(4, Some("b"), 0),
        ];
        let spec = SortSpec::from_keys(vec![key(ColumnId::English, direction)]);

        // Ties (1 and 4) keep input order in both directions.
        assert_eq!(sorted_ids(&spec, &entries), expected);
    }

    #[test]
    fn integers_compare_numerically() {
        let entries = vec![entry(1, None, 10), entry(2, None, 9), entry(3, None, 100)];
        let spec = SortSpec::from_keys(vec![key(ColumnId::Chapter, SortDirection::Ascending)]);

        assert_eq!(sorted_ids(&spec, &entries), vec![2, 1, 3]);
    }

    #[test]
    fn later_keys_break_ties() {
        let entries = vec![
            entry(1, Some("b"), 2),
            entry(2, Some("a"), 2),
            entry(3, Some("c"), 1),
        ];
        let spec = SortSpec::from_keys(vec![
            key(ColumnId::Chapter, SortDirection::Descending),
            key(ColumnId::English, SortDirection::Ascending),
        ]);

        assert_eq!(sorted_ids(&spec, &entries), vec![2, 1, 3]);
    }

    #[test]
    fn text_compares_ordinally() {
        let entries = vec![entry(1, Some("b"), 0), entry(2, Some("B"), 0)];
        let spec = SortSpec::from_keys(vec![key(ColumnId::English, SortDirection::Ascending)]);

        assert_eq!(sorted_ids(&spec, &entries), vec![2, 1]);
    }

    #[test]
    fn toggle_cycles_through_three_states() {
        let mut spec = SortSpec::new();

        spec.toggle(ColumnId::English, false);
        assert_eq!(
            spec.direction_of(ColumnId::English),
            Some(SortDirection::Ascending)
        );
        spec.toggle(ColumnId::English, false);
        assert_eq!(
            spec.direction_of(ColumnId::English),
            Some(SortDirection::Descending)
        );
        spec.toggle(ColumnId::English, false);
        assert!(spec.is_empty());
    }

    #[test]
    fn plain_toggle_replaces_and_multi_toggle_appends() {
        let mut spec = SortSpec::new();
        spec.toggle(ColumnId::English, false);
        spec.toggle(ColumnId::Chapter, false);
        assert_eq!(
            spec.keys(),
            &[key(ColumnId::Chapter, SortDirection::Ascending)]
        );

        spec.toggle(ColumnId::English, true);
        assert_eq!(
            spec.keys(),
            &[
                key(ColumnId::Chapter, SortDirection::Ascending),
                key(ColumnId::English, SortDirection::Ascending),
            ]
        );

        spec.toggle(ColumnId::Chapter, true);
        spec.toggle(ColumnId::Chapter, true);
        assert_eq!(
            spec.keys(),
            &[key(ColumnId::English, SortDirection::Ascending)]
        );
    }
}
