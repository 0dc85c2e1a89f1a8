// LogAnalyzer - core/export.rs
//
// JSON export of run outcomes (pretty-printed array of objects).

use crate::core::model::Outcome;
use crate::util::error::ExportError;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Export outcomes to any writer as a pretty-printed JSON array.
///
/// `export_path` is only used for error context.
pub fn export_json<W: Write>(
    outcomes: &[Outcome],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, outcomes).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(outcomes.len())
}

/// Write outcomes to `path`, creating missing parent directories first.
pub fn export_json_file(outcomes: &[Outcome], path: &Path) -> Result<usize, ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let file = fs::File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    let count = export_json(outcomes, &mut writer, path)?;
    writer.flush().map_err(io_err)?;

    tracing::info!(path = %path.display(), outcomes = count, "Report exported");
    Ok(count)
}
