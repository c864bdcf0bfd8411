//! Re-projection of source rows into the canonical column layout.
//!
//! Every projected row is `leading columns + one triplet per catalog entry`.
//! A row is only projected when the cell just before its file's assay offset
//! is a valid date; rows without that anchor are dropped and counted.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use tracing::trace;

use sensi_model::{
    AssayCatalog, FileLayout, FileStats, Row, SourceTable, TRIPLET_WIDTH, is_assay_name,
};

use crate::datetime::DateMatcher;

/// How the leading (non-assay) columns of a row are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadingLayout {
    /// Copy `row[0..offset)` unchanged.
    Verbatim,
    /// Copy `row[0..offset-1)`, pad with blanks, then the date cell, so the
    /// date always lands at `global_offset - 1`.
    Aligned { global_offset: usize },
}

impl LeadingLayout {
    /// Width of the leading columns for a file with the given assay offset.
    pub fn width(&self, offset: usize) -> usize {
        match *self {
            Self::Verbatim => offset,
            Self::Aligned { global_offset } => global_offset.max(offset),
        }
    }
}

/// A projected row paired with its parsed anchor date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedRow {
    pub date: NaiveDateTime,
    pub cells: Row,
}

/// Maps each assay name to the start of its first occurrence at or after
/// `offset`. Later duplicates in the same row are ignored.
///
/// Cells before `offset` are never searched, unlike a whole-row lookup: a
/// leading value that happens to equal an assay name is not an assay.
pub fn triplet_positions(row: &[String], offset: usize) -> HashMap<&str, usize> {
    let mut positions = HashMap::new();
    for (idx, cell) in row.iter().enumerate().skip(offset) {
        if is_assay_name(cell) {
            positions.entry(cell.as_str()).or_insert(idx);
        }
    }
    positions
}

/// Projects rows against a frozen catalog.
#[derive(Debug, Clone, Copy)]
pub struct RowProjector<'a> {
    catalog: &'a AssayCatalog,
    matcher: &'a DateMatcher,
    leading: LeadingLayout,
}

impl<'a> RowProjector<'a> {
    pub fn new(catalog: &'a AssayCatalog, matcher: &'a DateMatcher, leading: LeadingLayout) -> Self {
        Self {
            catalog,
            matcher,
            leading,
        }
    }

    /// Width of every row projected for a file with the given assay offset.
    pub fn output_width(&self, offset: usize) -> usize {
        self.leading.width(offset) + self.catalog.block_width()
    }

    /// Projects one row, or returns `None` when its anchor cell is not a date.
    pub fn project(&self, row: &[String], offset: usize) -> Option<DatedRow> {
        let anchor = offset.checked_sub(1).and_then(|idx| row.get(idx))?;
        let date = self.matcher.parse(anchor)?;

        let mut cells = Vec::with_capacity(self.output_width(offset));
        self.push_leading(&mut cells, row, offset);

        let positions = triplet_positions(row, offset);
        for name in self.catalog.iter() {
            match positions.get(name) {
                Some(&start) => push_triplet(&mut cells, row, start),
                None => cells.extend(std::iter::repeat_n(String::new(), TRIPLET_WIDTH)),
            }
        }
        Some(DatedRow { date, cells })
    }

    /// Projects every row of a file, counting included and dropped rows.
    pub fn project_table(
        &self,
        table: &SourceTable,
        layout: &FileLayout,
    ) -> (Vec<DatedRow>, FileStats) {
        let offset = layout.assay_offset();
        let mut records = Vec::with_capacity(table.rows.len());
        let mut dropped = 0usize;
        for (idx, row) in table.rows.iter().enumerate() {
            match self.project(row, offset) {
                Some(record) => records.push(record),
                None => {
                    dropped += 1;
                    trace!(
                        file = %table.display_name(),
                        row = idx + 1,
                        anchor_column = offset - 1,
                        "dropped row without anchor date"
                    );
                }
            }
        }
        let stats = FileStats {
            path: table.path.clone(),
            date_column: layout.date_column,
            assay_offset: offset,
            rows_read: table.rows.len(),
            rows_included: records.len(),
            rows_dropped: dropped,
        };
        (records, stats)
    }

    fn push_leading(&self, cells: &mut Row, row: &[String], offset: usize) {
        match self.leading {
            LeadingLayout::Verbatim => {
                cells.extend(row.iter().take(offset).cloned());
                cells.resize(offset, String::new());
            }
            LeadingLayout::Aligned { .. } => {
                let date_idx = offset - 1;
                cells.extend(row.iter().take(date_idx).cloned());
                cells.resize(self.leading.width(offset) - 1, String::new());
                cells.push(row.get(date_idx).cloned().unwrap_or_default());
            }
        }
    }
}

/// Copies the triplet starting at `start`, padding past the row end.
fn push_triplet(cells: &mut Row, row: &[String], start: usize) {
    for idx in start..start + TRIPLET_WIDTH {
        cells.push(row.get(idx).cloned().unwrap_or_default());
    }
}
