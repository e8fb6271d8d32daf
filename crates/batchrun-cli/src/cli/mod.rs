//! CLI for batchrun.

mod commands;
mod input;
mod menu;
mod output;
mod session;

use anyhow::Result;
use batchrun_core::config::{self, AppConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_download, run_filter, run_menu, run_report};
use session::Session;

/// Top-level CLI for batchrun.
#[derive(Debug, Parser)]
#[command(name = "batchrun")]
#[command(about = "batchrun: download files, filter JSON records and write CSV reports concurrently", long_about = None)]
pub struct Cli {
    /// Directory for all downloaded, filtered and report files (overrides config).
    #[arg(long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Number of tasks to run concurrently (overrides config).
    #[arg(long, global = true, value_name = "N")]
    pub workers: Option<usize>,

    /// Read configuration from this file instead of ~/.config/batchrun/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Interactive menu (default when no command is given).
    Menu,

    /// Download one or more URLs into the output directory.
    Download {
        /// HTTP/HTTPS URLs; commas also separate values.
        #[arg(required = true, value_delimiter = ',')]
        urls: Vec<String>,
        /// Print results as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Keep only `"priority": "high"` records of JSON files in the output directory.
    Filter {
        /// JSON file names relative to the output directory; commas also separate values.
        #[arg(required = true, value_delimiter = ',')]
        files: Vec<String>,
        /// Print results as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Write a CSV report (ID,Name,Status) from a JSON array of records.
    Report {
        /// JSON array, e.g. '[{"ID": 1, "Name": "Task1", "Status": "Done"}]'.
        records: String,
        /// Print results as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Loads the config file and applies command-line overrides.
    fn resolve_config(&self) -> Result<AppConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_or_init_at(path)?,
            None => config::load_or_init()?,
        };
        if let Some(dir) = &self.output_dir {
            cfg.output_dir = dir.clone();
        }
        if let Some(workers) = self.workers {
            cfg.workers = workers;
        }
        Ok(cfg)
    }
}

impl CliCommand {
    /// Whether results go to stdout as a JSON array.
    pub fn json_output(&self) -> bool {
        match self {
            CliCommand::Menu => false,
            CliCommand::Download { json, .. } | CliCommand::Filter { json, .. } | CliCommand::Report { json, .. } => *json,
        }
    }

    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = cli.resolve_config()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let command = cli.command.unwrap_or(CliCommand::Menu);
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        // stdout carries nothing but the JSON document in --json mode.
        let session = if command.json_output() {
            Session::start(&cfg, &mut std::io::stderr())?
        } else {
            Session::start(&cfg, &mut out)?
        };

        match command {
            CliCommand::Menu => run_menu(&session, &mut out).await?,
            CliCommand::Download { urls, json } => run_download(&session, &urls, json, &mut out).await?,
            CliCommand::Filter { files, json } => run_filter(&session, &files, json, &mut out).await?,
            CliCommand::Report { records, json } => run_report(&session, &records, json, &mut out).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
