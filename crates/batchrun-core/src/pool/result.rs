use serde::Serialize;

/// Outcome of one task, positionally correlated with its input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "lowercase")]
pub enum TaskResult {
    /// Produced file name.
    Success(String),
    /// Human-readable error message.
    Failure(String),
}

impl TaskResult {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskResult::Success(_))
    }

    /// File name on success, error message on failure.
    pub fn value(&self) -> &str {
        match self {
            TaskResult::Success(v) | TaskResult::Failure(v) => v,
        }
    }
}

/// Progress notification for one task of a running batch. `index` is the
/// 0-based position of the task in its batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEvent {
    Started {
        index: usize,
        total: usize,
        label: String,
    },
    Finished {
        index: usize,
        total: usize,
        label: String,
        success: bool,
    },
}

impl TaskEvent {
    pub fn index(&self) -> usize {
        match self {
            TaskEvent::Started { index, .. } | TaskEvent::Finished { index, .. } => *index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_tagged() {
        let ok = serde_json::to_value(TaskResult::Success("a.txt".into())).unwrap();
        assert_eq!(ok, serde_json::json!({"outcome": "success", "value": "a.txt"}));
        let err = serde_json::to_value(TaskResult::Failure("HTTP 404".into())).unwrap();
        assert_eq!(err, serde_json::json!({"outcome": "failure", "value": "HTTP 404"}));
    }

    #[test]
    fn accessors() {
        assert!(TaskResult::Success("x".into()).is_success());
        assert!(!TaskResult::Failure("y".into()).is_success());
        assert_eq!(TaskResult::Failure("y".into()).value(), "y");
    }
}
