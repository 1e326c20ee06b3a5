//! Integer list and range expressions such as `1-5, 8`.
//!
//! Terms are separated by commas. A term of digits is a single value, two
//! digit runs joined by `-` form an inclusive range, and anything else is
//! ignored. A range whose first bound exceeds the second contributes nothing.

use std::ops::RangeInclusive;

/// Parsed integer-set expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerSet {
    ranges: Vec<RangeInclusive<i64>>,
}

impl IntegerSet {
    /// Parses `spec`, returning `None` when no term contributes a member.
    ///
    /// `None` means the predicate is absent and matches everything.
    #[must_use]
    pub fn parse(spec: &str) -> Option<Self> {
        let ranges: Vec<_> = spec
            .split(',')
            .map(str::trim)
            .filter_map(parse_term)
            .filter(|range| !range.is_empty())
            .collect();

        (!ranges.is_empty()).then_some(Self { ranges })
    }

    /// Returns true when `value` is a member of the set.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        self.ranges.iter().any(|range| range.contains(&value))
    }
}

fn parse_term(term: &str) -> Option<RangeInclusive<i64>> {
    if let Some((start, end)) = term.split_once('-') {
        return Some(parse_digits(start)?..=parse_digits(end)?);
    }
    let value = parse_digits(term)?;
    Some(value..=value)
}

fn parse_digits(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::IntegerSet;

    #[rstest]
    #[case(1, true)]
    #[case(3, true)]
    #[case(5, true)]
    #[case(8, true)]
    #[case(0, false)]
    #[case(6, false)]
    #[case(9, false)]
    fn list_and_range_membership(#[case] value: i64, #[case] expected: bool) {
        let set = IntegerSet::parse("1-5, 8").expect("spec should parse");
        assert_eq!(set.contains(value), expected);
    }

    #[rstest]
    #[case::letters("abc")]
    #[case::blank("   ")]
    #[case::reversed_range("5-3")]
    #[case::negative("-2")]
    #[case::dangling_range("4-")]
    fn specs_without_members_are_absent(#[case] spec: &str) {
        assert_eq!(IntegerSet::parse(spec), None);
    }

    #[test]
    fn reversed_range_contributes_nothing_alongside_valid_terms() {
        let set = IntegerSet::parse("5-3, 8").expect("8 should parse");

        assert!(set.contains(8));
        assert!(!set.contains(4));
    }

    #[test]
    fn unparseable_terms_are_skipped() {
        let set = IntegerSet::parse("x, 2, 10-11, 1.5").expect("valid terms should parse");

        assert!(set.contains(2));
        assert!(set.contains(11));
        assert!(!set.contains(1));
    }
}
