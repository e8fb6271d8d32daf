//! CLI command handlers. Each command is in its own file.

mod download;
mod filter;
mod menu;
mod report;

pub use download::run_download;
pub use filter::run_filter;
pub use menu::run_menu;
pub use report::run_report;

use anyhow::Result;
use batchrun_core::pool::TaskBatch;
use std::io::Write;

use super::output;
use super::session::Session;

/// Runs one batch and prints either progress + text summary, or JSON only.
async fn run_batch<W: Write>(session: &Session, batch: TaskBatch, json: bool, out: &mut W) -> Result<()> {
    let kind = batch.kind();
    let inputs = batch.inputs().to_vec();
    tracing::info!(%kind, tasks = inputs.len(), output_dir = %session.output_dir().display(), "running command");
    let results = session.dispatch(batch, out, !json).await?;
    if json {
        output::print_json(out, &inputs, &results)?;
    } else {
        output::print_summary(out, kind, &inputs, &results)?;
    }
    Ok(())
}
