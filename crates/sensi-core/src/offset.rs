//! Date anchor detection.
//!
//! The assay block of an export starts one column after the first cell that
//! parses as a date. Rows are scanned in file order and the earliest row
//! containing a valid date decides the column for the whole file.

use tracing::debug;

use sensi_model::{FileLayout, Row, SourceTable, column_letter};

use crate::datetime::{DateFormat, DateMatcher};
use crate::error::{AlignError, Result};

/// Returns the index of the first date cell in `row`, if any.
pub fn find_date_column(row: &[String], matcher: &DateMatcher) -> Option<usize> {
    row.iter().position(|cell| matcher.is_valid_date(cell))
}

/// Scans rows until one contains a date and returns that date column.
pub fn detect_date_column(rows: &[Row], matcher: &DateMatcher) -> Option<usize> {
    rows.iter().find_map(|row| find_date_column(row, matcher))
}

/// Detects the column layout of one input file.
///
/// Fails with [`AlignError::NoDateFound`] when no row holds a valid date.
pub fn detect_layout(table: &SourceTable, matcher: &DateMatcher) -> Result<FileLayout> {
    let date_column =
        detect_date_column(&table.rows, matcher).ok_or_else(|| AlignError::NoDateFound {
            path: table.path.clone(),
            formats: describe_formats(matcher),
        })?;
    let layout = FileLayout::new(&table.path, date_column);
    debug!(
        file = %table.display_name(),
        date_column = %column_letter(layout.date_column),
        assay_column = %column_letter(layout.assay_offset()),
        "detected date anchor"
    );
    Ok(layout)
}

fn describe_formats(matcher: &DateMatcher) -> String {
    matcher
        .formats()
        .iter()
        .map(DateFormat::pattern)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|cell| (*cell).to_string()).collect()
    }

    fn iso_matcher() -> DateMatcher {
        DateMatcher::from_patterns(["YYYY-MM-DD HH:mm:ss"]).unwrap()
    }

    #[test]
    fn test_detects_date_column_and_offset() {
        let table = SourceTable::new(
            "a.txt",
            vec![row(&["A", "2020-01-05 00:00:00", "x", "1", "2"])],
        );

        let layout = detect_layout(&table, &iso_matcher()).unwrap();

        assert_eq!(layout.date_column, 1);
        assert_eq!(layout.assay_offset(), 2);
    }

    #[test]
    fn test_earliest_row_with_date_wins() {
        let rows = vec![
            row(&["Header", "Run date", "Drug"]),
            row(&["", ""]),
            row(&["A", "B", "2020-01-05 00:00:00", "AMP"]),
            row(&["2020-01-06 00:00:00", "AMP"]),
        ];

        assert_eq!(detect_date_column(&rows, &iso_matcher()), Some(2));
    }

    #[test]
    fn test_first_date_cell_in_row_wins() {
        let cells = row(&["x", "2020-01-05 00:00:00", "2020-01-06 00:00:00"]);
        assert_eq!(find_date_column(&cells, &iso_matcher()), Some(1));
    }

    #[test]
    fn test_no_date_is_fatal() {
        let table = SourceTable::new("exports/empty.txt", vec![row(&["A", "B", "C"])]);

        let err = detect_layout(&table, &iso_matcher()).unwrap_err();

        match err {
            AlignError::NoDateFound { path, formats } => {
                assert_eq!(path, std::path::PathBuf::from("exports/empty.txt"));
                assert_eq!(formats, "YYYY-MM-DD HH:mm:ss");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_table_has_no_date() {
        let table = SourceTable::new("none.txt", Vec::new());
        assert!(detect_layout(&table, &iso_matcher()).is_err());
    }
}
