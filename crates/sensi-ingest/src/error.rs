//! Error types for input ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating and reading input files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input path does not exist.
    #[error("input not found: {path}")]
    InputNotFound { path: PathBuf },

    /// Directory contains no files to process.
    #[error("no input files in directory: {path}")]
    EmptyDirectory { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Decoding Errors ===
    /// Encoding label is not recognized.
    #[error("unsupported encoding '{label}'")]
    UnsupportedEncoding { label: String },

    // === Parsing Errors ===
    /// Delimited text could not be tokenized.
    #[error("failed to parse {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::InputNotFound {
            path: PathBuf::from("/path/to/sensititre.txt"),
        };
        assert_eq!(err.to_string(), "input not found: /path/to/sensititre.txt");
    }

    #[test]
    fn test_unsupported_encoding_display() {
        let err = IngestError::UnsupportedEncoding {
            label: "klingon".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported encoding 'klingon'");
    }
}
