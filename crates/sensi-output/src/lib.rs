//! Output generation for aligned assay rows.
//!
//! Rows are written as comma-separated text with every cell quoted, no
//! header row and `\n` record terminators. The whole file is rendered in
//! memory and then written in one go, replacing any existing file.

mod error;
mod writer;

pub use error::{OutputError, Result};
pub use writer::{render_csv, write_csv};
