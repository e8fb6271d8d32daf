//! Turning user input (menu lines or command arguments) into a task batch.

use batchrun_core::pool::TaskBatch;
use batchrun_core::tasks::{TaskInput, TaskKind};

/// Input the shell refuses to dispatch.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// Nothing left after splitting and trimming.
    #[error("No input provided.")]
    Empty,
    /// Report data is not valid JSON.
    #[error("Invalid input. Please provide valid JSON data.")]
    InvalidJson(#[source] serde_json::Error),
}

/// Splits comma-separated input, trimming whitespace and dropping empty entries.
pub fn split_list(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builds a batch from a menu line: comma-separated URLs or file names, or one JSON document for a report.
pub fn parse_batch(kind: TaskKind, line: &str) -> Result<TaskBatch, InputError> {
    match kind {
        TaskKind::Download => download_batch(&split_list(line)),
        TaskKind::Filter => filter_batch(&split_list(line)),
        TaskKind::Report => report_batch(line),
    }
}

pub fn download_batch(urls: &[String]) -> Result<TaskBatch, InputError> {
    list_batch(TaskKind::Download, urls, |s| TaskInput::download(s))
}

pub fn filter_batch(files: &[String]) -> Result<TaskBatch, InputError> {
    list_batch(TaskKind::Filter, files, |s| TaskInput::filter(s))
}

fn list_batch(
    kind: TaskKind,
    items: &[String],
    make: fn(&str) -> TaskInput,
) -> Result<TaskBatch, InputError> {
    let inputs: Vec<TaskInput> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(make)
        .collect();
    TaskBatch::new(kind, inputs).map_err(|_| InputError::Empty)
}

/// The whole JSON document becomes a single report task.
pub fn report_batch(text: &str) -> Result<TaskBatch, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InputError::Empty);
    }
    let records: serde_json::Value = serde_json::from_str(text).map_err(InputError::InvalidJson)?;
    TaskBatch::new(TaskKind::Report, vec![TaskInput::report(records)]).map_err(|_| InputError::Empty)
}
