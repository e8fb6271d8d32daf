use crate::tasks::TaskKind;

/// Batch-level errors. These are caller mistakes or runtime faults; a task's
/// own failure is reported as a `Failure` result, never as a `PoolError`.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("batch is empty")]
    EmptyBatch,

    #[error("input {index} is a {found} task in a {expected} batch")]
    MixedBatch {
        index: usize,
        expected: TaskKind,
        found: TaskKind,
    },

    #[error("task join: {0}")]
    Join(#[from] tokio::task::JoinError),
}
