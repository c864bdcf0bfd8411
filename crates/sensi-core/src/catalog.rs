//! Assay catalog collection across all input files.

use std::collections::BTreeSet;

use sensi_model::{
    AssayCatalog, CatalogOrder, FileLayout, Row, SourceTable, TRIPLET_WIDTH, is_assay_name,
};

/// Names at triplet positions of `row`, starting at the assay offset.
pub fn triplet_names(row: &[String], offset: usize) -> impl Iterator<Item = &str> {
    row.iter()
        .skip(offset)
        .step_by(TRIPLET_WIDTH)
        .map(String::as_str)
        .filter(|cell| is_assay_name(cell))
}

/// Collects the distinct assay names of every `(rows, assay offset)` pair.
///
/// Duplicates collapse. The result is ordered per `order`; first-seen order
/// follows the iteration order of `files`.
pub fn collect_assay_names<'a, I>(files: I, order: CatalogOrder) -> AssayCatalog
where
    I: IntoIterator<Item = (&'a [Row], usize)>,
{
    let mut seen = BTreeSet::new();
    let mut first_seen = Vec::new();
    for (rows, offset) in files {
        for row in rows {
            for name in triplet_names(row, offset) {
                if seen.insert(name.to_string()) {
                    first_seen.push(name.to_string());
                }
            }
        }
    }
    let names = match order {
        CatalogOrder::Sorted => seen.into_iter().collect(),
        CatalogOrder::FirstSeen => first_seen,
    };
    AssayCatalog::from_ordered(names)
}

/// Builds the catalog for tables paired with their detected layouts.
pub fn build_catalog(
    tables: &[SourceTable],
    layouts: &[FileLayout],
    order: CatalogOrder,
) -> AssayCatalog {
    collect_assay_names(
        tables
            .iter()
            .zip(layouts)
            .map(|(table, layout)| (table.rows.as_slice(), layout.assay_offset())),
        order,
    )
}
