//! End-to-end runs of the align and inspect commands.

use std::fs;
use std::path::Path;

use clap::Parser;
use tempfile::TempDir;

use sensi_cli::cli::{AlignArgs, Cli, Command, InspectArgs};
use sensi_cli::commands::{run_align, run_inspect};
use sensi_core::AlignError;

fn align_args(args: &[&str]) -> AlignArgs {
    let argv = ["sensi-align", "align"].iter().chain(args).copied();
    match Cli::parse_from(argv).command {
        Command::Align(args) => args,
        Command::Inspect(_) => panic!("expected align command"),
    }
}

fn inspect_args(args: &[&str]) -> InspectArgs {
    let argv = ["sensi-align", "inspect"].iter().chain(args).copied();
    match Cli::parse_from(argv).command {
        Command::Inspect(args) => args,
        Command::Align(_) => panic!("expected inspect command"),
    }
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}

/// Two exports with the date anchor in different columns.
fn write_exports(dir: &Path) {
    fs::write(dir.join("a.txt"), "P1,1/05/2020 9:30,PEN,8,R\n").expect("write a");
    fs::write(dir.join("b.txt"), "X,P2,1/04/2020 8:00,AMP,2,S\n\n").expect("write b");
}

#[test]
fn test_align_directory_pads_offsets_and_sorts_by_date() {
    let input = TempDir::new().expect("input dir");
    let out = TempDir::new().expect("output dir");
    write_exports(input.path());
    let output = out.path().join("output.csv");

    let args = align_args(&["-i", path_arg(input.path()), "-o", path_arg(&output)]);
    let result = run_align(&args).expect("align run");

    assert_eq!(result.output.as_deref(), Some(output.as_path()));
    assert_eq!(result.alignment.catalog.names(), ["AMP", "PEN"]);
    assert_eq!(result.alignment.leading_width, 3);
    assert_eq!(result.alignment.total_included(), 2);
    assert_eq!(result.alignment.total_dropped(), 0);

    let written = fs::read_to_string(&output).expect("read output");
    insta::assert_snapshot!(written, @r#"
    "X","P2","1/04/2020 8:00","AMP","2","S","","",""
    "P1","","1/05/2020 9:30","","","","PEN","8","R"
    "#);
}

#[test]
fn test_dry_run_leaves_output_untouched() {
    let input = TempDir::new().expect("input dir");
    let out = TempDir::new().expect("output dir");
    write_exports(input.path());
    let output = out.path().join("output.csv");

    let args = align_args(&[
        "-i",
        path_arg(input.path()),
        "-o",
        path_arg(&output),
        "--dry-run",
    ]);
    let result = run_align(&args).expect("align run");

    assert!(result.output.is_none());
    assert_eq!(result.alignment.rows.len(), 2);
    assert!(!output.exists());
}

#[test]
fn test_report_lists_catalog_files_and_years() {
    let input = TempDir::new().expect("input dir");
    let out = TempDir::new().expect("output dir");
    write_exports(input.path());
    let output = out.path().join("output.csv");
    let report = out.path().join("report.json");

    let args = align_args(&[
        "-i",
        path_arg(input.path()),
        "-o",
        path_arg(&output),
        "--report",
        path_arg(&report),
    ]);
    let result = run_align(&args).expect("align run");
    assert_eq!(result.report.as_deref(), Some(report.as_path()));

    let json: serde_json::Value =
        serde_json::from_slice(&fs::read(&report).expect("read report")).expect("parse report");
    assert_eq!(json["assays"], serde_json::json!(["AMP", "PEN"]));
    assert_eq!(json["row_width"], 9);
    assert_eq!(json["rows_included"], 2);
    assert_eq!(json["years"], serde_json::json!([2020]));
    assert_eq!(json["options"]["merge"], "chronological");
    assert_eq!(json["files"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["files"][1]["assay_offset"], 3);
}

#[test]
fn test_no_align_rejects_mismatched_offsets() {
    let input = TempDir::new().expect("input dir");
    let out = TempDir::new().expect("output dir");
    write_exports(input.path());
    let output = out.path().join("output.csv");

    let args = align_args(&[
        "-i",
        path_arg(input.path()),
        "-o",
        path_arg(&output),
        "--no-align",
    ]);
    let error = run_align(&args).expect_err("offsets differ");

    assert!(matches!(
        error.downcast_ref::<AlignError>(),
        Some(AlignError::OffsetMismatch { .. })
    ));
    assert!(!output.exists());
}

#[test]
fn test_file_without_dates_is_fatal() {
    let input = TempDir::new().expect("input dir");
    let out = TempDir::new().expect("output dir");
    let file = input.path().join("sensititre.txt");
    fs::write(&file, "Patient,Date,Drug\nP1,unknown,AMP\n").expect("write input");
    let output = out.path().join("output.csv");

    let args = align_args(&["-i", path_arg(&file), "-o", path_arg(&output)]);
    let error = run_align(&args).expect_err("no date column");

    assert!(matches!(
        error.downcast_ref::<AlignError>(),
        Some(AlignError::NoDateFound { .. })
    ));
    assert!(!output.exists());
}

#[test]
fn test_tab_delimited_input_with_custom_format() {
    let input = TempDir::new().expect("input dir");
    let out = TempDir::new().expect("output dir");
    let file = input.path().join("export.tsv");
    fs::write(&file, "S1\t2021-03-02\tTET\t1\tS\n").expect("write input");
    let output = out.path().join("output.csv");

    let args = align_args(&[
        "-i",
        path_arg(&file),
        "-o",
        path_arg(&output),
        "-d",
        "tab",
        "-f",
        "YYYY-MM-DD",
    ]);
    let result = run_align(&args).expect("align run");

    assert_eq!(result.alignment.years.iter().copied().collect::<Vec<_>>(), [2021]);
    let written = fs::read_to_string(&output).expect("read output");
    assert_eq!(written, "\"S1\",\"2021-03-02\",\"TET\",\"1\",\"S\"\n");
}

#[test]
fn test_inspect_reports_layouts_and_catalog() {
    let input = TempDir::new().expect("input dir");
    write_exports(input.path());

    let args = inspect_args(&["-i", path_arg(input.path()), "--catalog-order", "first-seen"]);
    let result = run_inspect(&args).expect("inspect run");

    let columns: Vec<usize> = result
        .files
        .iter()
        .map(|file| file.layout.date_column)
        .collect();
    assert_eq!(columns, [1, 2]);
    assert_eq!(result.files[1].rows, 1);
    assert_eq!(result.catalog.names(), ["PEN", "AMP"]);
}
