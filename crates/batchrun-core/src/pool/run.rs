//! Refill loop: keep up to `workers` tasks in flight until the inputs are drained.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinSet;

use crate::tasks::TaskInput;

use super::error::PoolError;
use super::result::{TaskEvent, TaskResult};
use super::TaskRunner;

/// Runs `inputs` with at most `workers` blocking tasks at once. Each task owns
/// its input and reports back `(index, result)`; completions are sorted by
/// index so the returned order is the submission order.
pub(super) async fn run_batch(
    runner: Arc<dyn TaskRunner>,
    inputs: Vec<TaskInput>,
    workers: usize,
    events: Option<UnboundedSender<TaskEvent>>,
) -> Result<Vec<TaskResult>, PoolError> {
    let workers = workers.max(1);
    let total = inputs.len();
    let mut done: Vec<(usize, TaskResult)> = Vec::with_capacity(total);
    let mut pending = inputs.into_iter().enumerate();
    let mut join_set = JoinSet::new();

    loop {
        while join_set.len() < workers {
            let Some((index, input)) = pending.next() else {
                break;
            };
            let runner = Arc::clone(&runner);
            let events = events.clone();
            join_set.spawn_blocking(move || {
                let result = run_one(runner.as_ref(), index, total, &input, events.as_ref());
                (index, result)
            });
        }

        let Some(joined) = join_set.join_next().await else {
            break;
        };
        done.push(joined?);
    }

    // Every spawned task was joined above, so `done` holds one entry per input.
    done.sort_unstable_by_key(|(index, _)| *index);
    Ok(done.into_iter().map(|(_, result)| result).collect())
}

/// Task boundary: errors and panics become `Failure`.
fn run_one(
    runner: &dyn TaskRunner,
    index: usize,
    total: usize,
    input: &TaskInput,
    events: Option<&UnboundedSender<TaskEvent>>,
) -> TaskResult {
    let label = input.label().to_string();
    tracing::debug!(index, total, label = %label, "task started");
    emit(
        events,
        TaskEvent::Started {
            index,
            total,
            label: label.clone(),
        },
    );

    let result = match panic::catch_unwind(AssertUnwindSafe(|| runner.run(input))) {
        Ok(Ok(value)) => TaskResult::Success(value),
        Ok(Err(e)) => {
            tracing::warn!(index, label = %label, error = %e, "task failed");
            TaskResult::Failure(e.to_string())
        }
        Err(payload) => {
            let msg = panic_message(payload.as_ref());
            tracing::warn!(index, label = %label, panic = %msg, "task panicked");
            TaskResult::Failure(format!("task panicked: {}", msg))
        }
    };

    tracing::debug!(index, total, label = %label, success = result.is_success(), "task finished");
    emit(
        events,
        TaskEvent::Finished {
            index,
            total,
            label,
            success: result.is_success(),
        },
    );
    result
}

fn emit(events: Option<&UnboundedSender<TaskEvent>>, event: TaskEvent) {
    if let Some(tx) = events {
        // Receiver gone just means nobody is listening any more.
        let _ = tx.send(event);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
