//! Input path resolution.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Resolves the input target into the list of files to process.
///
/// A file path resolves to itself. A directory resolves to every direct
/// child that is a file: no recursion and no extension filter. Files are
/// sorted by name so repeated runs see the same input order.
pub fn resolve_inputs(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(IngestError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(path).map_err(|e| IngestError::DirectoryRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let child = entry.path();

        // Skip directories
        if !child.is_file() {
            continue;
        }

        files.push(child);
    }

    if files.is_empty() {
        return Err(IngestError::EmptyDirectory {
            path: path.to_path_buf(),
        });
    }

    // Sort by filename
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}
