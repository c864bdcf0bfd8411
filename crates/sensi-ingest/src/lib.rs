//! Instrument export ingestion.
//!
//! This crate turns an input path into in-memory [`SourceTable`]s that the
//! alignment core can work on.
//!
//! # Features
//!
//! - **Input Discovery**: A single file, or every direct child file of a directory
//! - **Encoding Resolution**: WHATWG labels plus common aliases (`utf16le`, `utf8`)
//! - **Delimited Loading**: Tab or comma separated, ragged rows, blank lines skipped
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use sensi_ingest::{ReadOptions, read_inputs, resolve_encoding};
//!
//! let options = ReadOptions::new(b'\t', resolve_encoding("utf16le")?);
//! let tables = read_inputs(Path::new("exports"), &options)?;
//! ```
//!
//! [`SourceTable`]: sensi_model::SourceTable

mod delimited;
mod discovery;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === Delimited Reading ===
pub use delimited::{
    ReadOptions, decode_bytes, parse_delimited, read_delimited, read_inputs, resolve_encoding,
};

// === Input Discovery ===
pub use discovery::resolve_inputs;
