// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal render loop for a run.
//!
//! Each tick drains the bridge into a [`RunView`], prints the lines that
//! arrived, and probes liveness at a slower cadence. The loop ends once the
//! view has been quiet after completion and every background task is done.
//! Ctrl-C terminates the child; the loop then keeps going so the final
//! log lines and output discovery are still shown. A second Ctrl-C
//! abandons the run and cancels its background tasks.

use rw_adapters::EventDrain;
use rw_core::LineSource;
use rw_engine::{ActiveRun, RunStatus, RunView, ViewConfig, ViewLine};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};

use crate::color;
use crate::output::OutputFormat;

pub const DEFAULT_TICK: Duration = Duration::from_millis(200);
const LIVENESS_INTERVAL: Duration = Duration::from_secs(1);

/// Final state of a watched run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub label: String,
    pub pid: u32,
    pub status: Outcome,
    pub exit_code: Option<i32>,
    pub log_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub log_lines: usize,
    pub reloads: u32,
    pub dropped_events: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Exit 0 and an output file was found
    Complete,
    /// Exit 0 but no output file
    Incomplete,
    Failed,
    Terminated,
}

impl Outcome {
    pub fn classify(status: &RunStatus, interrupted: bool) -> Self {
        if interrupted {
            return Outcome::Terminated;
        }
        match status {
            RunStatus::Complete {
                exit_code: Some(0), ..
            } => Outcome::Complete,
            RunStatus::CompleteNoArtifact { exit_code: Some(0) } => Outcome::Incomplete,
            RunStatus::Running => Outcome::Incomplete,
            RunStatus::Complete { .. } | RunStatus::CompleteNoArtifact { .. } => Outcome::Failed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Complete => "complete",
            Outcome::Incomplete => "incomplete",
            Outcome::Failed => "failed",
            Outcome::Terminated => "terminated",
        }
    }
}

/// Watch `run` until it settles, printing lines as they arrive.
pub async fn watch(
    run: ActiveRun,
    mut drain: EventDrain,
    config: ViewConfig,
    tick: Duration,
    format: OutputFormat,
) -> RunSummary {
    let mut view = RunView::new(config);
    let mut ticker = tokio::time::interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut ctrl_c_armed = true;
    let mut producers_open = true;
    let mut interrupted = false;
    let mut abandoned = false;
    let mut last_probe = Instant::now();

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            open = drain.changed(), if producers_open => {
                producers_open = open;
            }
            result = &mut ctrl_c, if ctrl_c_armed => {
                ctrl_c_armed = false;
                if let Err(e) = result {
                    tracing::warn!(error = %e, "ctrl-c handler failed");
                } else if interrupted {
                    eprintln!("{}", color::muted("interrupted again, abandoning the run"));
                    abandoned = true;
                    break;
                } else {
                    interrupted = true;
                    eprintln!("{}", color::muted("interrupted, stopping the run (ctrl-c again to abandon)"));
                    ctrl_c.set(tokio::signal::ctrl_c());
                    ctrl_c_armed = true;
                    run.terminate().await;
                }
            }
        }

        // The lifecycle event may have been dropped by a full bridge
        if let Some(completion) = run.completion() {
            view.observe_completion(completion.exit_code);
        }
        let outcome = view.tick(&drain);
        for line in view.take_new_lines() {
            match format {
                OutputFormat::Text => println!("{}", format_line(&line)),
                OutputFormat::Json => println!("{}", json_line(&line)),
            }
        }

        if run.completion().is_none() && last_probe.elapsed() >= LIVENESS_INTERVAL {
            last_probe = Instant::now();
            run.poll_liveness().await;
        }

        if !outcome.keep_polling && run.is_settled() {
            break;
        }
    }

    let summary = summarize(&run, &view, drain.dropped(), interrupted);
    tracing::info!(
        run_id = %summary.run_id,
        status = summary.status.as_str(),
        exit_code = ?summary.exit_code,
        reloads = summary.reloads,
        dropped = summary.dropped_events,
        abandoned,
        "run finished"
    );
    if abandoned {
        run.abort();
    } else {
        run.join().await;
    }
    summary
}

fn summarize(run: &ActiveRun, view: &RunView, dropped: u64, interrupted: bool) -> RunSummary {
    let status = view.status();
    let exit_code = match &status {
        RunStatus::Complete { exit_code, .. } | RunStatus::CompleteNoArtifact { exit_code } => {
            *exit_code
        }
        RunStatus::Running => None,
    };
    RunSummary {
        run_id: run.id().to_string(),
        label: run.label().to_string(),
        pid: run.pid(),
        status: Outcome::classify(&status, interrupted),
        exit_code,
        log_file: view.log_file().map(PathBuf::from),
        output_file: view.artifact().map(PathBuf::from),
        log_lines: view.log_lines().count(),
        reloads: view.reloads(),
        dropped_events: dropped,
    }
}

fn tag(source: LineSource) -> &'static str {
    match source {
        LineSource::LogFile => "log",
        LineSource::Stdout => "out",
        LineSource::Stderr => "err",
        LineSource::Monitor => "rw",
    }
}

/// One line for the terminal: a fixed-width source tag, then the text.
pub fn format_line(line: &ViewLine) -> String {
    format!(
        "{} {}",
        color::muted(&format!("{:>3} |", tag(line.source))),
        color::line(line.source, &line.text)
    )
}

/// One line as a JSON object, for `-o json` streaming.
pub fn json_line(line: &ViewLine) -> serde_json::Value {
    serde_json::json!({ "source": line.source, "text": line.text })
}

/// Closing block printed after the run settles.
pub fn render_summary(summary: &RunSummary) -> String {
    let code = summary
        .exit_code
        .map_or_else(|| "unknown".to_string(), |c| c.to_string());
    let mut out = format!(
        "{} (exit {code})\n",
        color::status(summary.status.as_str())
    );
    let log = summary
        .log_file
        .as_ref()
        .map_or_else(|| "none found".to_string(), |p| p.display().to_string());
    let output = summary
        .output_file
        .as_ref()
        .map_or_else(|| "none found".to_string(), |p| p.display().to_string());
    out.push_str(&format!("  log:    {log}\n"));
    out.push_str(&format!("  output: {output}\n"));
    if summary.dropped_events > 0 {
        out.push_str(&format!(
            "  {}\n",
            color::muted(&format!(
                "{} events dropped, log reloaded {} times",
                summary.dropped_events, summary.reloads
            ))
        ));
    }
    out
}

/// The output file's contents under a header, for `--show-output`.
pub fn render_output(path: &Path, contents: &str) -> String {
    let mut out = format!(
        "\n{} {}\n",
        color::header("Output:"),
        color::context(&path.display().to_string())
    );
    out.push_str(contents);
    if !contents.ends_with('\n') {
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
