//! `batchrun report <json>` – write a CSV report from a JSON array of records.

use anyhow::Result;
use std::io::Write;

use crate::cli::input;
use crate::cli::session::Session;

pub async fn run_report<W: Write>(session: &Session, records: &str, json: bool, out: &mut W) -> Result<()> {
    let batch = input::report_batch(records)?;
    super::run_batch(session, batch, json, out).await
}
