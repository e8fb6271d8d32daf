use crate::tasks::{TaskInput, TaskKind};

use super::error::PoolError;

/// Ordered, non-empty set of inputs of one kind, submitted together.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskBatch {
    kind: TaskKind,
    inputs: Vec<TaskInput>,
}

impl TaskBatch {
    /// Validates that the batch is non-empty and every input is of `kind`.
    pub fn new(kind: TaskKind, inputs: Vec<TaskInput>) -> Result<Self, PoolError> {
        if inputs.is_empty() {
            return Err(PoolError::EmptyBatch);
        }
        if let Some((index, input)) = inputs.iter().enumerate().find(|(_, i)| i.kind() != kind) {
            return Err(PoolError::MixedBatch {
                index,
                expected: kind,
                found: input.kind(),
            });
        }
        Ok(Self { kind, inputs })
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn inputs(&self) -> &[TaskInput] {
        &self.inputs
    }

    pub fn into_inputs(self) -> Vec<TaskInput> {
        self.inputs
    }
}
