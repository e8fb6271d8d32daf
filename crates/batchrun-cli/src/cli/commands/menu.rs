//! `batchrun` / `batchrun menu` – interactive menu on stdin/stdout.

use anyhow::Result;
use std::io::Write;

use crate::cli::menu;
use crate::cli::session::Session;

pub async fn run_menu<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    tracing::info!(output_dir = %session.output_dir().display(), "starting interactive menu");
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    menu::run_menu(session, &mut input, out).await
}
