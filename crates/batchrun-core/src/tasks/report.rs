//! Report task: write records as a CSV file with a fixed `ID,Name,Status` header.

use std::io;
use std::path::Path;

use serde_json::{Map, Value};

use crate::storage::OutputFile;

use super::error::TaskError;

/// Columns of every report, in order.
pub const REPORT_HEADERS: [&str; 3] = ["ID", "Name", "Status"];

/// `report_<unix seconds>.csv`
pub fn report_file_name(unix_secs: i64) -> String {
    format!("report_{}.csv", unix_secs)
}

/// Writes `records` (a JSON array of objects) to `output_dir/report_<now>.csv`
/// and returns the file name. Missing or null fields become empty cells; keys
/// other than the report columns are ignored.
pub fn write_report(records: &Value, output_dir: &Path) -> Result<String, TaskError> {
    let rows = as_records(records)?;
    let file_name = report_file_name(chrono::Utc::now().timestamp());
    let path = output_dir.join(&file_name);

    let out = OutputFile::create(output_dir, &file_name).map_err(|e| TaskError::write(&path, e))?;
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    writer
        .write_record(REPORT_HEADERS)
        .map_err(|e| TaskError::write(&path, csv_io_error(e)))?;
    for row in &rows {
        writer
            .write_record(REPORT_HEADERS.iter().map(|h| cell(row.get(*h))))
            .map_err(|e| TaskError::write(&path, csv_io_error(e)))?;
    }

    let out = writer
        .into_inner()
        .map_err(|e| TaskError::write(&path, e.into_error()))?;
    out.finalize().map_err(|e| TaskError::write(&path, e))?;

    tracing::debug!(rows = rows.len(), file = %file_name, "report written");
    Ok(file_name)
}

fn as_records(records: &Value) -> Result<Vec<&Map<String, Value>>, TaskError> {
    let items = records
        .as_array()
        .ok_or_else(|| TaskError::malformed("report", "expected a JSON array of objects"))?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_object()
                .ok_or_else(|| TaskError::malformed("report", format!("record {} is not an object", i)))
        })
        .collect()
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn csv_io_error(e: csv::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e)
}
