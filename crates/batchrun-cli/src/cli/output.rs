//! User-facing text for task progress and batch results.

use batchrun_core::pool::{TaskEvent, TaskResult};
use batchrun_core::tasks::{TaskInput, TaskKind};
use serde::Serialize;
use std::io::{self, Write};

fn activity(kind: TaskKind, label: &str) -> String {
    match kind {
        TaskKind::Download => format!("downloading {}", label),
        TaskKind::Filter => format!("processing {}", label),
        TaskKind::Report => "generating report".to_string(),
    }
}

/// `[2/3] started downloading <url>` / `[2/3] finished downloading <url>` / `[2/3] failed ...`
pub fn event_line(kind: TaskKind, event: &TaskEvent) -> String {
    match event {
        TaskEvent::Started {
            index,
            total,
            label,
        } => format!("[{}/{}] started {}", index + 1, total, activity(kind, label)),
        TaskEvent::Finished {
            index,
            total,
            label,
            success,
        } => {
            let verb = if *success { "finished" } else { "failed" };
            format!("[{}/{}] {} {}", index + 1, total, verb, activity(kind, label))
        }
    }
}

pub fn results_heading(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::Download => "Download Results:",
        TaskKind::Filter => "Data Processing Results:",
        TaskKind::Report => "Report Generation Results:",
    }
}

/// One summary line per task, naming the produced file or the failing input.
pub fn summary_line(input: &TaskInput, result: &TaskResult) -> String {
    match (input.kind(), result) {
        (TaskKind::Download, TaskResult::Success(file)) => format!("Downloaded: {}", file),
        (TaskKind::Download, TaskResult::Failure(msg)) => {
            format!("Error downloading {}: {}", input.label(), msg)
        }
        (TaskKind::Filter, TaskResult::Success(file)) => format!("Processed Data saved to: {}", file),
        (TaskKind::Filter, TaskResult::Failure(msg)) => {
            format!("Error processing {}: {}", input.label(), msg)
        }
        (TaskKind::Report, TaskResult::Success(file)) => format!("Report Generated: {}", file),
        (TaskKind::Report, TaskResult::Failure(msg)) => format!("Error generating report: {}", msg),
    }
}

pub fn print_summary<W: Write>(
    out: &mut W,
    kind: TaskKind,
    inputs: &[TaskInput],
    results: &[TaskResult],
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", results_heading(kind))?;
    for (input, result) in inputs.iter().zip(results) {
        writeln!(out, "{}", summary_line(input, result))?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonOutcome<'a> {
    input: &'a str,
    result: &'a TaskResult,
}

/// JSON array of `{ "input": <label>, "result": { "outcome": ..., "value": ... } }`.
pub fn print_json<W: Write>(out: &mut W, inputs: &[TaskInput], results: &[TaskResult]) -> io::Result<()> {
    let outcomes: Vec<JsonOutcome<'_>> = inputs
        .iter()
        .zip(results)
        .map(|(input, result)| JsonOutcome {
            input: input.label(),
            result,
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &outcomes)?;
    writeln!(out)
}
