//! Delimited text loading into [`SourceTable`]s.

use std::path::Path;

use csv::ReaderBuilder;
use encoding_rs::{Encoding, UTF_8};
use tracing::{debug, warn};

use sensi_model::{Row, SourceTable};

use super::encoding::decode_bytes;
use crate::discovery::resolve_inputs;
use crate::error::{IngestError, Result};

/// How input files are decoded and tokenized.
#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    /// Field delimiter byte (`b'\t'` or `b','`).
    pub delimiter: u8,
    /// Encoding used when the file carries no byte-order mark.
    pub encoding: &'static Encoding,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            encoding: UTF_8,
        }
    }
}

impl ReadOptions {
    pub fn new(delimiter: u8, encoding: &'static Encoding) -> Self {
        Self {
            delimiter,
            encoding,
        }
    }
}

/// Tokenizes delimited text into ragged rows.
///
/// Cells are kept verbatim (no trimming). Blank lines are skipped.
pub fn parse_delimited(text: &str, delimiter: u8) -> std::result::Result<Vec<Row>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Reads one input file fully into memory.
pub fn read_delimited(path: &Path, options: &ReadOptions) -> Result<SourceTable> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::InputNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let (text, used, had_errors) = decode_bytes(&bytes, options.encoding);
    if had_errors {
        warn!(
            path = %path.display(),
            encoding = used.name(),
            "malformed byte sequences replaced while decoding"
        );
    }

    let rows = parse_delimited(&text, options.delimiter).map_err(|e| IngestError::CsvParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!(
        path = %path.display(),
        encoding = used.name(),
        bytes = bytes.len(),
        rows = rows.len(),
        "read input file"
    );

    Ok(SourceTable::new(path, rows))
}

/// Resolves the input target and reads every resolved file.
pub fn read_inputs(path: &Path, options: &ReadOptions) -> Result<Vec<SourceTable>> {
    resolve_inputs(path)?
        .iter()
        .map(|file| read_delimited(file, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tab_delimited_ragged_rows() {
        let rows = parse_delimited("a\tb\tc\nd\te\n", b'\t').unwrap();
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["d", "e"]]);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let rows = parse_delimited("a,b\n\n\nc,d\n", b',').unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["c", "d"]);
    }

    #[test]
    fn test_parse_keeps_cells_verbatim() {
        let rows = parse_delimited(" AMP ,\"8, R\",\n", b',').unwrap();
        assert_eq!(rows, vec![vec![" AMP ", "8, R", ""]]);
    }

    #[test]
    fn test_parse_crlf_line_endings() {
        let rows = parse_delimited("a,b\r\nc,d\r\n", b',').unwrap();
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }
}
