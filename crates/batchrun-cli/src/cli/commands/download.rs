//! `batchrun download <url>...` – fetch URLs into the output directory.

use anyhow::Result;
use std::io::Write;

use crate::cli::input;
use crate::cli::session::Session;

pub async fn run_download<W: Write>(session: &Session, urls: &[String], json: bool, out: &mut W) -> Result<()> {
    let batch = input::download_batch(urls)?;
    super::run_batch(session, batch, json, out).await
}
