//! Raw rows as read from an instrument export.

use std::path::PathBuf;

/// One tokenized input record. Cell counts vary between rows.
pub type Row = Vec<String>;

/// All rows of one input file, held in memory for the whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTable {
    /// Path the rows were read from.
    pub path: PathBuf,
    /// Rows in file order, blank lines already skipped.
    pub rows: Vec<Row>,
}

impl SourceTable {
    pub fn new(path: impl Into<PathBuf>, rows: Vec<Row>) -> Self {
        Self {
            path: path.into(),
            rows,
        }
    }

    /// Returns the file name for display, falling back to the full path.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .map_or_else(|| self.path.display().to_string(), str::to_string)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_uses_file_name() {
        let table = SourceTable::new("/data/run/plate_a.txt", Vec::new());
        assert_eq!(table.display_name(), "plate_a.txt");
    }

    #[test]
    fn test_len_counts_ragged_rows() {
        let table = SourceTable::new(
            "a.txt",
            vec![
                vec!["a".to_string()],
                vec!["a".to_string(), "b".to_string(), "c".to_string()],
            ],
        );
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
        assert!(SourceTable::new("b.txt", Vec::new()).is_empty());
    }
}
