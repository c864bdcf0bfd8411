//! Cross-file offset alignment and chronological merge.

use sensi_model::{FileLayout, MergeMode, Row, column_letter};

use crate::error::{AlignError, Result};
use crate::projector::DatedRow;

/// Largest assay offset across all files (0 when there are none).
pub fn global_offset(layouts: &[FileLayout]) -> usize {
    layouts
        .iter()
        .map(FileLayout::assay_offset)
        .max()
        .unwrap_or(0)
}

/// Returns the single assay offset shared by all files.
///
/// Fails with [`AlignError::OffsetMismatch`] when files disagree.
pub fn common_offset(layouts: &[FileLayout]) -> Result<usize> {
    let Some(first) = layouts.first() else {
        return Ok(0);
    };
    let offset = first.assay_offset();
    if layouts.iter().all(|layout| layout.assay_offset() == offset) {
        return Ok(offset);
    }
    let details = layouts
        .iter()
        .map(|layout| {
            format!(
                "{}: {}",
                layout.path.display(),
                column_letter(layout.assay_offset())
            )
        })
        .collect::<Vec<_>>()
        .join(", ");
    Err(AlignError::OffsetMismatch { details })
}

/// Stable sort by anchor date; equal dates keep their relative order.
pub fn sort_chronologically(records: &mut [DatedRow]) {
    records.sort_by_key(|record| record.date);
}

/// Combines per-file records in input order.
///
/// The chronological sort only applies across files: a single file keeps
/// its own row order.
pub fn merge_records(per_file: Vec<Vec<DatedRow>>, mode: MergeMode) -> Vec<DatedRow> {
    let multi_file = per_file.len() > 1;
    let mut records: Vec<DatedRow> = per_file.into_iter().flatten().collect();
    if mode == MergeMode::Chronological && multi_file {
        sort_chronologically(&mut records);
    }
    records
}

/// Drops the sort keys.
pub fn into_rows(records: Vec<DatedRow>) -> Vec<Row> {
    records.into_iter().map(|record| record.cells).collect()
}
