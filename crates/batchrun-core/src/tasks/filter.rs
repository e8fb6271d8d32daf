//! Filter task: keep only records whose `priority` is exactly `"high"`.

use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::storage::OutputFile;

use super::error::TaskError;

/// Prefix added to the input's base name to form the output file name.
pub const PROCESSED_PREFIX: &str = "processed_";

const PRIORITY_FIELD: &str = "priority";
const HIGH_PRIORITY: &str = "high";

/// Strict match: the field must be present and be the JSON string `"high"`.
pub fn is_high_priority(record: &Map<String, Value>) -> bool {
    matches!(record.get(PRIORITY_FIELD), Some(Value::String(s)) if s == HIGH_PRIORITY)
}

/// `processed_<base name>`, or `None` if `file_name` has no final component.
pub fn processed_file_name(file_name: &str) -> Option<String> {
    let base = Path::new(file_name).file_name()?.to_str()?;
    Some(format!("{}{}", PROCESSED_PREFIX, base))
}

/// Input names are relative to the output directory and may not leave it.
fn stays_inside(file_name: &str) -> bool {
    Path::new(file_name)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Reads `output_dir/file_name` as a JSON array of objects, keeps the
/// high-priority ones in their original order and writes them to
/// `output_dir/processed_<base name>`. Returns the output file name.
pub fn filter_records(file_name: &str, output_dir: &Path) -> Result<String, TaskError> {
    if !stays_inside(file_name) {
        return Err(TaskError::malformed(file_name, "not a file in the output directory"));
    }
    let input_path = output_dir.join(file_name);
    let data = fs::read(&input_path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => TaskError::NotFound {
            path: input_path.clone(),
        },
        _ => TaskError::malformed(file_name, format!("cannot read: {}", e)),
    })?;

    let records: Vec<Map<String, Value>> = serde_json::from_slice(&data)
        .map_err(|e| TaskError::malformed(file_name, format!("expected a JSON array of objects: {}", e)))?;

    let kept: Vec<&Map<String, Value>> = records.iter().filter(|r| is_high_priority(r)).collect();
    tracing::debug!(
        file = file_name,
        total = records.len(),
        kept = kept.len(),
        "filtered records"
    );

    let output_name = processed_file_name(file_name)
        .ok_or_else(|| TaskError::malformed(file_name, "not a file name"))?;
    let output_path = output_dir.join(&output_name);

    let mut out =
        OutputFile::create(output_dir, &output_name).map_err(|e| TaskError::write(&output_path, e))?;
    write_pretty(&mut out, &kept).map_err(|e| TaskError::write(&output_path, e))?;
    out.finalize().map_err(|e| TaskError::write(&output_path, e))?;

    Ok(output_name)
}

/// JSON with 4-space indentation and a trailing newline.
fn write_pretty<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut *out, formatter);
    value.serialize(&mut ser).map_err(io::Error::from)?;
    out.write_all(b"\n")
}
