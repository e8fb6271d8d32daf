//! One CLI session: output directory ensured once, one pool reused for every batch.

use anyhow::{Context, Result};
use batchrun_core::config::AppConfig;
use batchrun_core::pool::{TaskBatch, TaskPool, TaskResult};
use batchrun_core::storage;
use batchrun_core::tasks::TaskContext;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::output;

pub struct Session {
    pool: TaskPool,
    output_dir: PathBuf,
}

impl Session {
    /// Creates the output directory if needed and builds the pool. A newly
    /// created directory is announced on `notice`.
    pub fn start<W: Write>(cfg: &AppConfig, notice: &mut W) -> Result<Self> {
        let created = storage::ensure_output_dir(&cfg.output_dir)
            .with_context(|| format!("create output directory {}", cfg.output_dir.display()))?;
        if created {
            writeln!(notice, "Created directory: {}", cfg.output_dir.display())?;
        }
        let ctx = TaskContext::from_config(cfg);
        Ok(Self {
            pool: TaskPool::new(cfg.workers, Arc::new(ctx)),
            output_dir: cfg.output_dir.clone(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Runs the batch. With `progress`, start/finish lines are written to `out`
    /// while tasks run.
    pub async fn dispatch<W: Write>(
        &self,
        batch: TaskBatch,
        out: &mut W,
        progress: bool,
    ) -> Result<Vec<TaskResult>> {
        if !progress {
            return Ok(self.pool.run(batch, None).await?);
        }

        let kind = batch.kind();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let printer = async {
            while let Some(event) = rx.recv().await {
                writeln!(out, "{}", output::event_line(kind, &event))?;
                out.flush()?;
            }
            Ok::<(), std::io::Error>(())
        };

        let (results, printed) = tokio::join!(self.pool.run(batch, Some(tx)), printer);
        let results = results?;
        printed?;
        Ok(results)
    }
}
