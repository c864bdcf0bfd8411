//! Configuration toggles for the alignment run.

use serde::{Deserialize, Serialize};

/// Ordering applied to the assay catalog once it is collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogOrder {
    /// Lexicographic order of the assay names.
    #[default]
    Sorted,
    /// Order in which names were first seen (files in input order).
    FirstSeen,
}

/// How projected rows from several files are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeMode {
    /// Stable sort of all rows by their anchor date when several files are
    /// aligned. A single file keeps its row order.
    #[default]
    Chronological,
    /// Files in input order, rows in file order.
    Concatenate,
}

/// Options controlling column alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignOptions {
    /// Catalog ordering.
    pub catalog_order: CatalogOrder,

    /// Pad every file's leading columns to the largest assay offset.
    ///
    /// When disabled, leading columns are copied verbatim and all files
    /// must share a single assay offset.
    pub align_offsets: bool,

    /// Row combination strategy.
    pub merge: MergeMode,
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            catalog_order: CatalogOrder::Sorted,
            align_offsets: true,
            merge: MergeMode::Chronological,
        }
    }
}

impl AlignOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog_order(mut self, order: CatalogOrder) -> Self {
        self.catalog_order = order;
        self
    }

    pub fn with_align_offsets(mut self, enable: bool) -> Self {
        self.align_offsets = enable;
        self
    }

    pub fn with_merge(mut self, merge: MergeMode) -> Self {
        self.merge = merge;
        self
    }
}
