use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sensi_model::{AssayCatalog, column_letter};

use crate::types::{InspectResult, RunResult};

pub fn print_summary(result: &RunResult) {
    let alignment = &result.alignment;
    println!("Input: {}", result.input.display());
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, not written)"),
    }
    if let Some(path) = &result.report {
        println!("Report: {}", path.display());
    }
    println!("Date formats: {}", result.date_formats.join(" | "));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Rows"),
        header_cell("Date col"),
        header_cell("Assay col"),
        header_cell("Included"),
        header_cell("Dropped"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    let mut total_read = 0usize;
    for file in &alignment.files {
        total_read += file.rows_read;
        table.add_row(vec![
            file_cell(&file.path),
            Cell::new(file.rows_read),
            Cell::new(column_letter(file.date_column)),
            Cell::new(column_letter(file.assay_offset)),
            Cell::new(file.rows_included).fg(Color::Green),
            dropped_cell(file.rows_dropped),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_read).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(alignment.total_included())
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        dropped_cell(alignment.total_dropped()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    print_catalog(&alignment.catalog);
    println!(
        "Row width: {} ({} leading + {} assay columns)",
        alignment.row_width(),
        alignment.leading_width,
        alignment.catalog.block_width()
    );
    if !alignment.years.is_empty() {
        let years: Vec<String> = alignment.years.iter().map(i32::to_string).collect();
        println!("Years: {}", years.join(", "));
    }
}

pub fn print_inspection(result: &InspectResult) {
    println!("Input: {}", result.input.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Rows"),
        header_cell("Date col"),
        header_cell("Assay col"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Center);
    for file in &result.files {
        table.add_row(vec![
            file_cell(&file.layout.path),
            Cell::new(file.rows),
            Cell::new(column_letter(file.layout.date_column)),
            Cell::new(column_letter(file.layout.assay_offset())),
        ]);
    }
    println!("{table}");
    print_catalog(&result.catalog);
}

fn print_catalog(catalog: &AssayCatalog) {
    if catalog.is_empty() {
        println!("Assays: none");
        return;
    }
    println!("Assays ({}):", catalog.len());
    for (index, name) in catalog.iter().enumerate() {
        println!("  {:>3}. {name}", index + 1);
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn file_cell(path: &Path) -> Cell {
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
    Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn dropped_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
