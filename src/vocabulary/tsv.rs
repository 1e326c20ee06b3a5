//! Tab-separated import parsing.
//!
//! Rows follow the entry field order without the identity column:
//! english, furigana, japanese, times seen, missed %, flag, public notes,
//! personal notes, book, chapter, section, category. A leading header row is
//! skipped when its first cell reads `English`. Any malformed row rejects the
//! whole payload.

use super::error::GatewayError;
use super::models::{FlagValue, NewEntry};

/// Number of columns an import row may carry.
pub const TSV_COLUMN_COUNT: usize = 12;

/// Parses a TSV payload into entries ready for insertion.
///
/// Blank lines are ignored. Rows with fewer than [`TSV_COLUMN_COUNT`] cells
/// treat the missing trailing cells as empty.
///
/// # Errors
///
/// Returns [`GatewayError::EmptyImport`] when the payload holds no rows, and
/// [`GatewayError::InvalidImport`] for the first row that cannot be parsed.
pub fn parse_tsv(payload: &str) -> Result<Vec<NewEntry>, GatewayError> {
    if payload.trim().is_empty() {
        return Err(GatewayError::EmptyImport);
    }

    let mut rows = Vec::new();
    let mut seen_first_row = false;

    for (index, raw_line) in payload.lines().enumerate() {
        let line = raw_line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let first_row = !seen_first_row;
        seen_first_row = true;
        if first_row && is_header(line) {
            continue;
        }

        let line_number = index.saturating_add(1);
        rows.push(parse_row(line, line_number)?);
    }

    if rows.is_empty() {
        return Err(GatewayError::EmptyImport);
    }
    Ok(rows)
}

fn is_header(line: &str) -> bool {
    line.split('\t')
        .next()
        .is_some_and(|cell| cell.trim().eq_ignore_ascii_case("english"))
}

fn parse_row(line: &str, line_number: usize) -> Result<NewEntry, GatewayError> {
    let cells: Vec<&str> = line.split('\t').map(str::trim).collect();
    if cells.len() > TSV_COLUMN_COUNT {
        return Err(GatewayError::InvalidImport {
            line: line_number,
            message: format!(
                "expected at most {TSV_COLUMN_COUNT} columns, found {}",
                cells.len()
            ),
        });
    }

    let row = RowCells {
        line: line_number,
        cells: &cells,
    };

    Ok(NewEntry {
        english: row.text(0),
        furigana: row.text(1),
        japanese: row.text(2),
        times_seen: row.integer(3, "times seen")?,
        recently_missed_percent: row.float(4, "missed %")?,
        flag: row.flag(5)?,
        public_notes: row.text(6),
        personal_notes: row.text(7),
        book: row.text(8),
        chapter: row.integer(9, "chapter")?,
        section: row.integer(10, "section")?,
        word_category: row.text(11),
    })
}

struct RowCells<'row, 'line> {
    line: usize,
    cells: &'row [&'line str],
}

impl RowCells<'_, '_> {
    fn cell(&self, position: usize) -> &str {
        self.cells.get(position).copied().unwrap_or_default()
    }

    fn text(&self, position: usize) -> Option<String> {
        let value = self.cell(position);
        (!value.is_empty()).then(|| value.to_owned())
    }

    fn invalid(&self, column: &str, value: &str) -> GatewayError {
        GatewayError::InvalidImport {
            line: self.line,
            message: format!("{column} must be a number, got {value:?}"),
        }
    }

    fn integer(&self, position: usize, column: &str) -> Result<i64, GatewayError> {
        let value = self.cell(position);
        if value.is_empty() {
            return Ok(0);
        }
        value
            .parse::<i64>()
            .map_err(|_| self.invalid(column, value))
    }

    fn float(&self, position: usize, column: &str) -> Result<f64, GatewayError> {
        let value = self.cell(position);
        if value.is_empty() {
            return Ok(0.0);
        }
        value
            .trim_end_matches('%')
            .parse::<f64>()
            .map_err(|_| self.invalid(column, value))
    }

    fn flag(&self, position: usize) -> Result<FlagValue, GatewayError> {
        let raw = self.integer(position, "flag")?;
        FlagValue::try_from(raw).map_err(|message| GatewayError::InvalidImport {
            line: self.line,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const HEADER: &str = "English\tFurigana\tJapanese\tSeen\tMissed%\tFlag\tPublicNotes\tPersonalNotes\tBook\tChapter\tSection\tCategory";

    #[test]
    fn parses_full_row() {
        let payload = "cat\tねこ\t猫\t3\t12.5\t1\tpet\t\tGenki I\t2\t1\tnoun";

        let rows = parse_tsv(payload).expect("payload should parse");

        assert_eq!(
            rows,
            vec![NewEntry {
                english: Some("cat".to_owned()),
                furigana: Some("ねこ".to_owned()),
                japanese: Some("猫".to_owned()),
                times_seen: 3,
                recently_missed_percent: 12.5,
                flag: FlagValue::Flagged,
                public_notes: Some("pet".to_owned()),
                personal_notes: None,
                book: Some("Genki I".to_owned()),
                chapter: 2,
                section: 1,
                word_category: Some("noun".to_owned()),
            }]
        );
    }

    #[test]
    fn skips_header_and_blank_lines() {
        let payload = format!("{HEADER}\n\ndog\t\t犬\n\r\nbird\t\t鳥\r\n");

        let rows = parse_tsv(&payload).expect("payload should parse");

        let names: Vec<_> = rows.iter().map(|row| row.english.as_deref()).collect();
        assert_eq!(names, vec![Some("dog"), Some("bird")]);
        assert!(rows.iter().all(|row| row.chapter == 0 && row.flag == FlagValue::Unflagged));
    }

    #[rstest]
    #[case::blank("")]
    #[case::whitespace("  \n\t\n")]
    #[case::header_only(HEADER)]
    fn rejects_payload_without_rows(#[case] payload: &str) {
        assert_eq!(parse_tsv(payload), Err(GatewayError::EmptyImport));
    }

    #[test]
    fn reports_line_of_first_malformed_row() {
        let payload = "dog\t\t犬\t1\nbird\t\t鳥\tmany";

        let error = parse_tsv(payload).expect_err("row 2 should fail");

        assert!(
            matches!(error, GatewayError::InvalidImport { line: 2, .. }),
            "unexpected error: {error:?}"
        );
    }

    #[test]
    fn rejects_flag_outside_zero_or_one() {
        let payload = "dog\t\t犬\t1\t0\t5";

        assert!(matches!(
            parse_tsv(payload),
            Err(GatewayError::InvalidImport { line: 1, .. })
        ));
    }

    #[test]
    fn rejects_rows_with_too_many_columns() {
        let payload = format!("{}\textra", "x\t".repeat(TSV_COLUMN_COUNT - 1) + "x");

        assert!(matches!(
            parse_tsv(&payload),
            Err(GatewayError::InvalidImport { line: 1, .. })
        ));
    }
}
