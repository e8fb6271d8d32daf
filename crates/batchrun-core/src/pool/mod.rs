//! Fixed-size task pool.
//!
//! Runs every input of a [`TaskBatch`] on the blocking thread pool with at most
//! `workers` tasks in flight, converts each task's error (or panic) into a
//! `Failure` result, and returns one [`TaskResult`] per input in submission
//! order. Optional [`TaskEvent`]s report start/finish as tasks progress.

mod batch;
mod error;
mod result;
mod run;

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::tasks::{TaskError, TaskInput};

pub use batch::TaskBatch;
pub use error::PoolError;
pub use result::{TaskEvent, TaskResult};

/// Executes one task input. Implemented by [`crate::tasks::TaskContext`] for
/// the real task bodies; tests plug in their own.
pub trait TaskRunner: Send + Sync + 'static {
    fn run(&self, input: &TaskInput) -> Result<String, TaskError>;
}

pub struct TaskPool {
    workers: usize,
    runner: Arc<dyn TaskRunner>,
}

impl TaskPool {
    /// Pool running at most `workers` tasks at once (at least 1).
    pub fn new(workers: usize, runner: Arc<dyn TaskRunner>) -> Self {
        Self {
            workers: workers.max(1),
            runner,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs the whole batch and returns results aligned with its inputs.
    ///
    /// Individual task failures never fail this call. If `events` is `Some`,
    /// a `Started` and a `Finished` event is sent for every task; the sender is
    /// dropped when the batch completes so a receiver loop ends on its own.
    pub async fn run(
        &self,
        batch: TaskBatch,
        events: Option<UnboundedSender<TaskEvent>>,
    ) -> Result<Vec<TaskResult>, PoolError> {
        let kind = batch.kind();
        let total = batch.len();
        tracing::info!(%kind, tasks = total, workers = self.workers, "running batch");

        let results =
            run::run_batch(Arc::clone(&self.runner), batch.into_inputs(), self.workers, events)
                .await?;

        let failures = results.iter().filter(|r| !r.is_success()).count();
        tracing::info!(%kind, tasks = total, failures, "batch completed");
        Ok(results)
    }
}
