//! JSON run report.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use sensi_model::{AlignOptions, FileStats};

use crate::types::RunResult;

/// Machine-readable summary of one alignment run.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub input: &'a Path,
    pub output: Option<&'a Path>,
    pub options: AlignOptions,
    pub date_formats: &'a [String],
    pub leading_width: usize,
    pub row_width: usize,
    pub assays: &'a [String],
    pub files: &'a [FileStats],
    pub rows_included: usize,
    pub rows_dropped: usize,
    pub years: &'a BTreeSet<i32>,
}

impl<'a> RunReport<'a> {
    pub fn new(result: &'a RunResult, options: AlignOptions) -> Self {
        let alignment = &result.alignment;
        Self {
            input: &result.input,
            output: result.output.as_deref(),
            options,
            date_formats: &result.date_formats,
            leading_width: alignment.leading_width,
            row_width: alignment.row_width(),
            assays: alignment.catalog.names(),
            files: &alignment.files,
            rows_included: alignment.total_included(),
            rows_dropped: alignment.total_dropped(),
            years: &alignment.years,
        }
    }
}

/// Writes the report as pretty-printed JSON.
pub fn write_report(path: &Path, report: &RunReport<'_>) -> Result<()> {
    let json = serde_json::to_vec_pretty(report).context("serialize run report")?;
    std::fs::write(path, json).with_context(|| format!("write report {}", path.display()))
}
