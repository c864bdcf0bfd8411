//! The canonical, frozen list of assay names for a run.

use serde::{Deserialize, Serialize};

/// Number of cells in one assay block: name followed by two values.
pub const TRIPLET_WIDTH: usize = 3;

/// Filler character some UTF-16 exports leave in otherwise empty cells.
pub const NULL_SENTINEL: char = '\0';

/// Returns true if a cell at a triplet position names an assay.
///
/// Empty cells and cells made only of [`NULL_SENTINEL`] never do.
pub fn is_assay_name(cell: &str) -> bool {
    !cell.is_empty() && !cell.chars().all(|ch| ch == NULL_SENTINEL)
}

/// Ordered, deduplicated assay names shared by every projected row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssayCatalog {
    names: Vec<String>,
}

impl AssayCatalog {
    /// Builds a catalog from names that are already unique and ordered.
    pub fn from_ordered(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Total width of the assay block in every projected row.
    pub fn block_width(&self) -> usize {
        self.names.len() * TRIPLET_WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_assay_name() {
        assert!(is_assay_name("AMP"));
        assert!(is_assay_name(" "));
        assert!(!is_assay_name(""));
        assert!(!is_assay_name("\0"));
        assert!(!is_assay_name("\0\0"));
    }

    #[test]
    fn test_block_width() {
        let catalog = AssayCatalog::from_ordered(vec!["AMP".to_string(), "PEN".to_string()]);
        assert_eq!(catalog.block_width(), 6);
        assert_eq!(catalog.len(), 2);
    }
}
