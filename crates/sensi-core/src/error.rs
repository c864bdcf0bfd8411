//! Error types for the alignment core.

use std::path::PathBuf;
use thiserror::Error;

use crate::datetime::DateFormatError;

/// Fatal errors that abort an alignment run.
#[derive(Debug, Error)]
pub enum AlignError {
    /// No row of the file contains a cell matching the date format.
    #[error("no valid date found in {path} (formats: {formats})")]
    NoDateFound { path: PathBuf, formats: String },

    /// Offset alignment is disabled but files disagree on the assay offset.
    #[error(
        "assay offsets differ across files ({details}); enable offset alignment to combine them"
    )]
    OffsetMismatch { details: String },

    /// Date format pattern could not be compiled.
    #[error(transparent)]
    DateFormat(#[from] DateFormatError),
}

/// Result type for alignment operations.
pub type Result<T> = std::result::Result<T, AlignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_date_found_names_file() {
        let err = AlignError::NoDateFound {
            path: PathBuf::from("exports/plate_a.txt"),
            formats: "M/DD/YYYY H:mm".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no valid date found in exports/plate_a.txt (formats: M/DD/YYYY H:mm)"
        );
    }

    #[test]
    fn test_from_date_format_error() {
        let err: AlignError = DateFormatError::Empty.into();
        assert!(matches!(err, AlignError::DateFormat(DateFormatError::Empty)));
        assert_eq!(err.to_string(), "date format is empty");
    }
}
