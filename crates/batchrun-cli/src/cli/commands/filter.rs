//! `batchrun filter <file>...` – keep high-priority records of JSON files.

use anyhow::Result;
use std::io::Write;

use crate::cli::input;
use crate::cli::session::Session;

pub async fn run_filter<W: Write>(session: &Session, files: &[String], json: bool, out: &mut W) -> Result<()> {
    let batch = input::filter_batch(files)?;
    super::run_batch(session, batch, json, out).await
}
