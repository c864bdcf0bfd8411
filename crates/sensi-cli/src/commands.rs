use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use sensi_core::{DateMatcher, align_tables, build_catalog, detect_layouts};
use sensi_ingest::{ReadOptions, read_inputs, resolve_encoding};
use sensi_model::{AlignOptions, SourceTable, column_letter};
use sensi_output::write_csv;

use crate::cli::{AlignArgs, InputArgs, InspectArgs};
use crate::logging::redact_value;
use crate::report::{RunReport, write_report};
use crate::types::{InspectResult, InspectedFile, RunResult};

pub fn run_align(args: &AlignArgs) -> Result<RunResult> {
    let input = &args.input;
    let run_span = info_span!("run", input = %input.input.display());
    let _run_guard = run_span.enter();

    let matcher = compile_matcher(input)?;
    let options = AlignOptions::new()
        .with_catalog_order(input.catalog_order.into())
        .with_align_offsets(!args.no_align)
        .with_merge(args.merge_mode());

    // =========================================================================
    // Stage 1: Ingest - resolve inputs and read every file into memory
    // =========================================================================
    let tables = ingest(input)?;

    // =========================================================================
    // Stage 2: Align - anchor, catalog, project, merge
    // =========================================================================
    let align_start = Instant::now();
    let alignment = align_tables(&tables, &matcher, &options).context("align assay columns")?;
    info!(
        rows_included = alignment.total_included(),
        rows_dropped = alignment.total_dropped(),
        row_width = alignment.row_width(),
        years = ?alignment.years,
        duration_ms = align_start.elapsed().as_millis(),
        "alignment complete"
    );

    // =========================================================================
    // Stage 3: Output - write the CSV unless this is a dry run
    // =========================================================================
    let output = if args.dry_run {
        info!(path = %args.output.display(), "dry run, output not written");
        None
    } else {
        let write_span = info_span!("write", path = %args.output.display());
        write_span
            .in_scope(|| write_csv(&args.output, &alignment.rows))
            .with_context(|| format!("write output {}", args.output.display()))?;
        info!(
            path = %args.output.display(),
            rows = alignment.rows.len(),
            "output written"
        );
        Some(args.output.clone())
    };

    let mut result = RunResult {
        input: input.input.clone(),
        output,
        report: None,
        date_formats: input.date_formats.clone(),
        alignment,
    };

    if let Some(path) = &args.report {
        write_report(path, &RunReport::new(&result, options))?;
        debug!(path = %path.display(), "run report written");
        result.report = Some(path.clone());
    }

    Ok(result)
}

pub fn run_inspect(args: &InspectArgs) -> Result<InspectResult> {
    let input = &args.input;
    let run_span = info_span!("inspect", input = %input.input.display());
    let _run_guard = run_span.enter();

    let matcher = compile_matcher(input)?;
    let tables = ingest(input)?;
    let layouts = detect_layouts(&tables, &matcher).context("detect date columns")?;
    let catalog = build_catalog(&tables, &layouts, input.catalog_order.into());

    let mut files = Vec::with_capacity(tables.len());
    for (table, layout) in tables.iter().zip(layouts) {
        if let Some(anchor) = first_anchor(table, layout.date_column, &matcher) {
            debug!(
                file = %table.display_name(),
                column = %column_letter(layout.date_column),
                anchor = %redact_value(anchor),
                "first anchor date"
            );
        }
        files.push(InspectedFile {
            layout,
            rows: table.len(),
        });
    }

    Ok(InspectResult {
        input: input.input.clone(),
        files,
        catalog,
    })
}

fn compile_matcher(input: &InputArgs) -> Result<DateMatcher> {
    DateMatcher::from_patterns(&input.date_formats).context("compile date formats")
}

fn ingest(input: &InputArgs) -> Result<Vec<SourceTable>> {
    let encoding = resolve_encoding(&input.encoding).context("resolve input encoding")?;
    let read_options = ReadOptions::new(input.delimiter.as_byte(), encoding);
    let ingest_span = info_span!("ingest", encoding = encoding.name());
    let ingest_start = Instant::now();
    let tables = ingest_span
        .in_scope(|| read_inputs(&input.input, &read_options))
        .with_context(|| format!("read input {}", input.input.display()))?;
    info!(
        file_count = tables.len(),
        row_count = tables.iter().map(SourceTable::len).sum::<usize>(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(tables)
}

fn first_anchor<'a>(
    table: &'a SourceTable,
    date_column: usize,
    matcher: &DateMatcher,
) -> Option<&'a str> {
    table
        .rows
        .iter()
        .filter_map(|row| row.get(date_column))
        .map(String::as_str)
        .find(|cell| matcher.is_valid_date(cell))
}
