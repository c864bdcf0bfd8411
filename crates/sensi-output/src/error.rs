//! Error types for output generation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while rendering or writing output.
#[derive(Debug, Error)]
pub enum OutputError {
    /// CSV serialization failed.
    #[error("failed to render CSV: {0}")]
    Render(#[from] csv::Error),

    /// Output file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
