//! Interactive menu, driven as an explicit state machine:
//! `Idle → AwaitingInput(kind) → Dispatching → Reporting → Idle`, until `Exit`.

use anyhow::Result;
use batchrun_core::pool::{TaskBatch, TaskResult};
use batchrun_core::tasks::{TaskInput, TaskKind};
use std::io::{self, BufRead, Write};

use super::input;
use super::output;
use super::session::Session;

#[derive(Debug)]
pub enum MenuState {
    Idle,
    AwaitingInput(TaskKind),
    Dispatching(TaskBatch),
    Reporting {
        kind: TaskKind,
        inputs: Vec<TaskInput>,
        results: Vec<TaskResult>,
    },
    Exit,
}

/// Maps a menu choice to the next state; `None` for an invalid choice.
pub fn choose(choice: &str) -> Option<MenuState> {
    match choice.trim() {
        "1" => Some(MenuState::AwaitingInput(TaskKind::Download)),
        "2" => Some(MenuState::AwaitingInput(TaskKind::Filter)),
        "3" => Some(MenuState::AwaitingInput(TaskKind::Report)),
        "4" => Some(MenuState::Exit),
        _ => None,
    }
}

pub fn display_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "===== Batch Task Menu =====")?;
    writeln!(out, "1. Download Files from URLs")?;
    writeln!(out, "2. Process JSON Data")?;
    writeln!(out, "3. Generate CSV Reports")?;
    writeln!(out, "4. Exit")?;
    writeln!(out, "===========================")
}

fn input_prompt(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::Download => "Enter URLs to download (comma-separated): ",
        TaskKind::Filter => "Enter JSON file names to process (comma-separated): ",
        TaskKind::Report => {
            "Enter structured data for the report (e.g., [{\"ID\": 1, \"Name\": \"Task1\", \"Status\": \"Done\"}]):\n"
        }
    }
}

fn prompt<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    write!(out, "{}", text)?;
    out.flush()
}

/// One line without its terminator; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim_end_matches(|c| c == '\r' || c == '\n').to_string()))
}

/// Runs the menu until the user exits or input ends.
pub async fn run_menu<R: BufRead, W: Write>(session: &Session, input: &mut R, out: &mut W) -> Result<()> {
    let mut state = MenuState::Idle;
    loop {
        state = match state {
            MenuState::Idle => {
                display_menu(out)?;
                prompt(out, "Enter your choice (1-4): ")?;
                match read_line(input)? {
                    None => MenuState::Exit,
                    Some(line) => match choose(&line) {
                        Some(next) => next,
                        None => {
                            tracing::debug!(choice = %line, "invalid menu choice");
                            writeln!(out, "Invalid choice. Please enter a valid option.")?;
                            MenuState::Idle
                        }
                    },
                }
            }
            MenuState::AwaitingInput(kind) => {
                prompt(out, input_prompt(kind))?;
                match read_line(input)? {
                    None => MenuState::Exit,
                    Some(line) => match input::parse_batch(kind, &line) {
                        Ok(batch) => MenuState::Dispatching(batch),
                        Err(e) => {
                            writeln!(out, "{}", e)?;
                            MenuState::Idle
                        }
                    },
                }
            }
            MenuState::Dispatching(batch) => {
                let kind = batch.kind();
                let inputs = batch.inputs().to_vec();
                let results = session.dispatch(batch, out, true).await?;
                MenuState::Reporting {
                    kind,
                    inputs,
                    results,
                }
            }
            MenuState::Reporting {
                kind,
                inputs,
                results,
            } => {
                output::print_summary(out, kind, &inputs, &results)?;
                MenuState::Idle
            }
            MenuState::Exit => {
                writeln!(out, "Exiting the application. Goodbye!")?;
                return Ok(());
            }
        };
    }
}
