//! Data model shared by the assay alignment crates.
//!
//! Everything here is plain data: the ingest crate produces [`SourceTable`]s,
//! the core crate turns them into an [`AlignmentResult`], and the CLI reports
//! on the [`FileStats`] it carries.

mod catalog;
mod layout;
mod options;
mod stats;
mod table;

pub use catalog::{AssayCatalog, NULL_SENTINEL, TRIPLET_WIDTH, is_assay_name};
pub use layout::{FileLayout, column_letter};
pub use options::{AlignOptions, CatalogOrder, MergeMode};
pub use stats::{AlignmentResult, FileStats};
pub use table::{Row, SourceTable};
