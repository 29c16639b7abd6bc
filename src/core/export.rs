// WasteDesk - core/export.rs
//
// CSV and JSON export of filtered records.
// Core layer: writes to any Write trait object.

use crate::core::record::ListRecord;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export format selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Export records to CSV, one flattened row per record.
///
/// `export_path` is only used for error context.
pub fn export_csv<R: ListRecord, W: Write>(
    records: &[&R],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_error = |e: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(R::export_header())
        .map_err(csv_error)?;

    let mut count = 0;
    for record in records {
        csv_writer
            .write_record(record.export_row())
            .map_err(csv_error)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export records to JSON (array of objects, same shape as dataset files).
pub fn export_json<R: ListRecord, W: Write>(
    records: &[&R],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(records.len())
}

/// Dispatch on `format`.
pub fn export<R: ListRecord, W: Write>(
    format: ExportFormat,
    records: &[&R],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    match format {
        ExportFormat::Csv => export_csv(records, writer, export_path),
        ExportFormat::Json => export_json(records, writer, export_path),
    }
}
