//! CSV rendering and file output.

use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::debug;

use sensi_model::Row;

use crate::error::{OutputError, Result};

/// Renders rows as fully quoted, headerless CSV.
pub fn render_csv(rows: &[Row]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for row in rows {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| OutputError::Render(csv::Error::from(e.into_error())))
}

/// Writes rows to `path`, replacing the file if it exists.
pub fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let bytes = render_csv(rows)?;
    std::fs::write(path, &bytes).map_err(|e| OutputError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(
        path = %path.display(),
        rows = rows.len(),
        bytes = bytes.len(),
        "wrote output"
    );
    Ok(())
}
