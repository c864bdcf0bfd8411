//! In-memory alignment pipeline.
//!
//! Stages, in order:
//!
//! 1. Detect the date anchor of every file
//! 2. Collect the assay catalog across all files
//! 3. Project each file's rows (aligned to the global offset when enabled)
//! 4. Merge files, chronologically (more than one file) or by concatenation

use std::collections::BTreeSet;

use chrono::Datelike;
use tracing::{info, info_span};

use sensi_model::{AlignOptions, AlignmentResult, FileLayout, SourceTable, column_letter};

use crate::catalog::build_catalog;
use crate::datetime::DateMatcher;
use crate::error::Result;
use crate::merge::{common_offset, global_offset, into_rows, merge_records};
use crate::offset::detect_layout;
use crate::projector::{LeadingLayout, RowProjector};

/// Detects the layout of every table; the first file without a date aborts.
pub fn detect_layouts(tables: &[SourceTable], matcher: &DateMatcher) -> Result<Vec<FileLayout>> {
    tables
        .iter()
        .map(|table| detect_layout(table, matcher))
        .collect()
}

/// Runs the full alignment over tables that are already in memory.
pub fn align_tables(
    tables: &[SourceTable],
    matcher: &DateMatcher,
    options: &AlignOptions,
) -> Result<AlignmentResult> {
    let span = info_span!("align", files = tables.len());
    let _guard = span.enter();

    let layouts = detect_layouts(tables, matcher)?;
    for (table, layout) in tables.iter().zip(&layouts) {
        info!(
            file = %table.display_name(),
            date_column = %column_letter(layout.date_column),
            assay_column = %column_letter(layout.assay_offset()),
            "found date anchor"
        );
    }

    let catalog = build_catalog(tables, &layouts, options.catalog_order);
    info!(
        assay_count = catalog.len(),
        assays = %catalog.names().join(", "),
        "collected assay catalog"
    );

    let (leading, leading_width) = if options.align_offsets {
        let global = global_offset(&layouts);
        (
            LeadingLayout::Aligned {
                global_offset: global,
            },
            global,
        )
    } else {
        (LeadingLayout::Verbatim, common_offset(&layouts)?)
    };

    let projector = RowProjector::new(&catalog, matcher, leading);
    let mut files = Vec::with_capacity(tables.len());
    let mut per_file = Vec::with_capacity(tables.len());
    for (table, layout) in tables.iter().zip(&layouts) {
        let (records, stats) = projector.project_table(table, layout);
        info!(
            file = %table.display_name(),
            rows_included = stats.rows_included,
            rows_dropped = stats.rows_dropped,
            "projected rows"
        );
        files.push(stats);
        per_file.push(records);
    }

    let records = merge_records(per_file, options.merge);
    let years: BTreeSet<i32> = records.iter().map(|record| record.date.year()).collect();

    Ok(AlignmentResult {
        rows: into_rows(records),
        catalog,
        leading_width,
        files,
        years,
    })
}
