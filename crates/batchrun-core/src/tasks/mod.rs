//! Task bodies run by the pool: download a URL, filter a JSON file, write a CSV report.
//!
//! Each body takes its input by reference plus the output directory and returns
//! the produced file name, or a [`TaskError`] that the pool turns into a
//! `Failure` result.

mod download;
mod error;
mod filter;
mod report;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{AppConfig, DownloadConfig};
use crate::pool::TaskRunner;

pub use download::{classify_curl_error, fetch};
pub use error::{TaskError, TransportKind};
pub use filter::{filter_records, is_high_priority, processed_file_name, PROCESSED_PREFIX};
pub use report::{report_file_name, write_report, REPORT_HEADERS};

/// Kind of work a task performs. A batch only holds inputs of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Download,
    Filter,
    Report,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskKind::Download => "download",
            TaskKind::Filter => "filter",
            TaskKind::Report => "report",
        };
        f.write_str(s)
    }
}

/// Kind-specific payload of one task.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskInput {
    /// URL to fetch into the output directory.
    Download { url: String },
    /// Name of a JSON file inside the output directory.
    Filter { file_name: String },
    /// Records for one CSV report; expected to be a JSON array of objects.
    Report { records: serde_json::Value },
}

impl TaskInput {
    pub fn download(url: impl Into<String>) -> Self {
        TaskInput::Download { url: url.into() }
    }

    pub fn filter(file_name: impl Into<String>) -> Self {
        TaskInput::Filter {
            file_name: file_name.into(),
        }
    }

    pub fn report(records: serde_json::Value) -> Self {
        TaskInput::Report { records }
    }

    pub fn kind(&self) -> TaskKind {
        match self {
            TaskInput::Download { .. } => TaskKind::Download,
            TaskInput::Filter { .. } => TaskKind::Filter,
            TaskInput::Report { .. } => TaskKind::Report,
        }
    }

    /// Identifies the input in user-facing output: the URL, the file name, or `report`.
    pub fn label(&self) -> &str {
        match self {
            TaskInput::Download { url } => url,
            TaskInput::Filter { file_name } => file_name,
            TaskInput::Report { .. } => "report",
        }
    }
}

/// Everything a task body needs besides its input. Resolved once at startup.
#[derive(Debug, Clone)]
pub struct TaskContext {
    pub output_dir: PathBuf,
    pub download: DownloadConfig,
}

impl TaskContext {
    pub fn new(output_dir: impl Into<PathBuf>, download: DownloadConfig) -> Self {
        Self {
            output_dir: output_dir.into(),
            download,
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self::new(cfg.output_dir.clone(), cfg.download.clone())
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Runs the body matching the input's kind.
    pub fn execute(&self, input: &TaskInput) -> Result<String, TaskError> {
        match input {
            TaskInput::Download { url } => fetch(url, &self.output_dir, &self.download),
            TaskInput::Filter { file_name } => filter_records(file_name, &self.output_dir),
            TaskInput::Report { records } => write_report(records, &self.output_dir),
        }
    }
}

impl TaskRunner for TaskContext {
    fn run(&self, input: &TaskInput) -> Result<String, TaskError> {
        self.execute(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn labels_identify_inputs() {
        assert_eq!(TaskInput::download("http://a/b.txt").label(), "http://a/b.txt");
        assert_eq!(TaskInput::filter("data.json").label(), "data.json");
        assert_eq!(TaskInput::report(json!([])).label(), "report");
    }

    #[test]
    fn kinds_match_constructors() {
        assert_eq!(TaskInput::download("u").kind(), TaskKind::Download);
        assert_eq!(TaskInput::filter("f").kind(), TaskKind::Filter);
        assert_eq!(TaskInput::report(json!([])).kind(), TaskKind::Report);
        assert_eq!(TaskKind::Filter.to_string(), "filter");
    }

    #[test]
    fn execute_dispatches_by_kind() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = TaskContext::new(dir.path(), DownloadConfig::default());

        let err = ctx.execute(&TaskInput::filter("missing.json")).unwrap_err();
        assert!(matches!(err, TaskError::NotFound { .. }));

        let name = ctx
            .execute(&TaskInput::report(json!([{"ID": 1, "Name": "A", "Status": "Done"}])))
            .unwrap();
        assert!(dir.path().join(&name).exists());
    }
}
