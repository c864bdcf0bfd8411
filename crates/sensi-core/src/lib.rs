//! Assay column alignment core.
//!
//! Given in-memory [`SourceTable`](sensi_model::SourceTable)s this crate
//! anchors each file on its date column, builds the shared assay catalog,
//! and re-emits every row with each assay in a fixed triplet slot.

pub mod catalog;
pub mod datetime;
pub mod error;
pub mod merge;
pub mod offset;
pub mod pipeline;
pub mod projector;

pub use catalog::{build_catalog, collect_assay_names, triplet_names};
pub use datetime::{DEFAULT_DATE_FORMAT, DateFormat, DateFormatError, DateMatcher, is_valid_date};
pub use error::{AlignError, Result};
pub use merge::{common_offset, global_offset, into_rows, merge_records, sort_chronologically};
pub use offset::{detect_date_column, detect_layout, find_date_column};
pub use pipeline::{align_tables, detect_layouts};
pub use projector::{DatedRow, LeadingLayout, RowProjector, triplet_positions};
