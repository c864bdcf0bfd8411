//! Per-file column layout detected from the date anchor.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the date anchor and assay block sit in one input file.
///
/// Computed once per file by offset detection and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLayout {
    /// Source path of the file.
    pub path: PathBuf,
    /// Column index (0-based) of the first cell matching the date format.
    pub date_column: usize,
}

impl FileLayout {
    pub fn new(path: impl Into<PathBuf>, date_column: usize) -> Self {
        Self {
            path: path.into(),
            date_column,
        }
    }

    /// Column index where the first assay triplet begins.
    pub fn assay_offset(&self) -> usize {
        self.date_column + 1
    }
}

/// Converts a 0-based column index to a spreadsheet column label
/// (`0 -> A`, `25 -> Z`, `26 -> AA`).
pub fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut remaining = index + 1;
    while remaining > 0 {
        let rem = (remaining - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        remaining = (remaining - 1) / 26;
    }
    letters.iter().rev().collect()
}
