//! Run results and per-file diagnostics.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::catalog::AssayCatalog;
use crate::table::Row;

/// Diagnostics for one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    pub path: PathBuf,
    /// Column holding the date anchor.
    pub date_column: usize,
    /// Column where the assay block starts.
    pub assay_offset: usize,
    /// Rows read from the file (blank lines excluded).
    pub rows_read: usize,
    /// Rows projected into the output.
    pub rows_included: usize,
    /// Rows dropped because the anchor cell was not a valid date.
    pub rows_dropped: usize,
}

/// Everything produced by one alignment run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentResult {
    /// Fixed-width output rows in final order.
    #[serde(skip)]
    pub rows: Vec<Row>,
    pub catalog: AssayCatalog,
    /// Width of the leading (non-assay) columns in every output row.
    pub leading_width: usize,
    pub files: Vec<FileStats>,
    /// Calendar years of the anchor dates of included rows.
    pub years: BTreeSet<i32>,
}

impl AlignmentResult {
    /// Width shared by every output row.
    pub fn row_width(&self) -> usize {
        self.leading_width + self.catalog.block_width()
    }

    pub fn total_included(&self) -> usize {
        self.files.iter().map(|file| file.rows_included).sum()
    }

    pub fn total_dropped(&self) -> usize {
        self.files.iter().map(|file| file.rows_dropped).sum()
    }
}
