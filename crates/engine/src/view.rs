// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! View-model of one run, updated by the render loop on every tick.
//!
//! Console output (stdout, stderr, monitor notices) and the tailed log are
//! kept in separate bounded buffers. Periodically the log buffer is
//! reconciled against the file on disk: if the file is much larger than
//! what the buffer accounts for (events were dropped, or the view started
//! late), the whole file is reloaded and already-covered incoming lines
//! are skipped.

use rw_adapters::{read_full_log, EventDrain};
use rw_core::{LineSource, LogEvent};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::Instant;

/// Reload when the file exceeds the accounted bytes by this factor.
const RELOAD_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    pub console_capacity: usize,
    pub log_capacity: usize,
    pub reconcile_interval: Duration,
    /// How long the run must be complete with no new events before the
    /// render loop may stop
    pub quiet_period: Duration,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            console_capacity: 2_000,
            log_capacity: 10_000,
            reconcile_interval: Duration::from_secs(3),
            quiet_period: Duration::from_secs(2),
        }
    }
}

/// One line, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewLine {
    pub source: LineSource,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Complete {
        exit_code: Option<i32>,
        artifact: PathBuf,
    },
    CompleteNoArtifact {
        exit_code: Option<i32>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// New events arrived or the log was reloaded
    pub changed: bool,
    pub keep_polling: bool,
}

pub struct RunView {
    config: ViewConfig,
    console: VecDeque<ViewLine>,
    log_lines: VecDeque<String>,
    /// Lines applied since the last `take_new_lines`
    fresh: Vec<ViewLine>,
    log_file: Option<PathBuf>,
    /// Position in the current file reached by received log lines, in
    /// decoded bytes; tracks the tailer's offset unless events were dropped
    stream_bytes: u64,
    /// Received log lines up to this many bytes were already loaded from disk
    covered_bytes: u64,
    artifact: Option<PathBuf>,
    running: bool,
    completed: bool,
    exit_code: Option<i32>,
    reconcile_due: bool,
    last_event_at: Instant,
    last_reconcile: Instant,
    reloads: u32,
}

impl RunView {
    pub fn new(config: ViewConfig) -> Self {
        let now = Instant::now();
        Self {
            config,
            console: VecDeque::new(),
            log_lines: VecDeque::new(),
            fresh: Vec::new(),
            log_file: None,
            stream_bytes: 0,
            covered_bytes: 0,
            artifact: None,
            running: false,
            completed: false,
            exit_code: None,
            reconcile_due: false,
            last_event_at: now,
            last_reconcile: now,
            reloads: 0,
        }
    }

    /// Drain the bridge, apply every event, and reconcile when due.
    pub fn tick(&mut self, drain: &EventDrain) -> TickOutcome {
        let events = drain.drain_all();
        let now = Instant::now();
        let mut changed = !events.is_empty();
        if changed {
            self.last_event_at = now;
        }
        for event in events {
            self.apply(event);
        }

        if self.reconcile_due || now - self.last_reconcile >= self.config.reconcile_interval {
            self.last_reconcile = now;
            self.reconcile_due = false;
            changed |= self.reconcile();
        }

        let quiet = now - self.last_event_at >= self.config.quiet_period;
        TickOutcome {
            changed,
            keep_polling: !(self.completed && quiet),
        }
    }

    /// Apply one event.
    pub fn apply(&mut self, event: LogEvent) {
        match event {
            LogEvent::LineAppended {
                source: LineSource::LogFile,
                text,
            } => {
                self.stream_bytes += text.len() as u64 + 1;
                if self.stream_bytes <= self.covered_bytes {
                    return;
                }
                self.fresh.push(ViewLine {
                    source: LineSource::LogFile,
                    text: text.clone(),
                });
                push_bounded(&mut self.log_lines, text, self.config.log_capacity);
            }
            LogEvent::LineAppended { source, text } => {
                let line = ViewLine { source, text };
                self.fresh.push(line.clone());
                push_bounded(&mut self.console, line, self.config.console_capacity);
            }
            LogEvent::LogFileSelected { path } => {
                tracing::debug!(path = %path.display(), "view switched log file");
                self.log_lines.clear();
                self.stream_bytes = 0;
                self.covered_bytes = 0;
                self.log_file = Some(path);
            }
            LogEvent::OutputFileDiscovered { path } => {
                self.artifact = Some(path);
            }
            LogEvent::ProcessLifecycleChanged { running: true, .. } => {
                self.running = true;
            }
            LogEvent::ProcessLifecycleChanged {
                running: false,
                exit_code,
            } => self.observe_completion(exit_code),
        }
    }

    /// Record completion learned outside the bridge. The lifecycle event
    /// can be dropped when the bridge overflows; the first record wins.
    pub fn observe_completion(&mut self, exit_code: Option<i32>) {
        self.running = false;
        if !self.completed {
            self.completed = true;
            self.exit_code = exit_code;
            // Pick up trailing writes the tailer has not delivered yet
            self.reconcile_due = true;
        }
    }

    /// Reload the log file if it is much larger than what the buffer
    /// accounts for. Returns whether a reload happened.
    fn reconcile(&mut self) -> bool {
        let Some(path) = self.log_file.clone() else {
            return false;
        };
        let Ok(meta) = std::fs::metadata(&path) else {
            return false;
        };
        let on_disk = meta.len();
        let accounted = self.stream_bytes.max(self.covered_bytes);
        if (on_disk as f64) <= accounted as f64 * RELOAD_FACTOR {
            return false;
        }
        self.reload(&path, on_disk)
    }

    fn reload(&mut self, path: &Path, on_disk: u64) -> bool {
        let content = match read_full_log(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "log reload failed");
                return false;
            }
        };
        // Only complete lines; the tailer delivers the rest once terminated
        let complete = content.rfind('\n').map_or("", |i| &content[..=i]);
        let lines: Vec<&str> = complete.lines().collect();
        let covered: u64 = lines.iter().map(|l| l.len() as u64 + 1).sum();

        tracing::info!(
            path = %path.display(),
            on_disk,
            accounted = self.stream_bytes,
            lines = lines.len(),
            "reloaded log file"
        );
        self.log_lines.clear();
        let mut end = 0u64;
        for line in lines {
            end += line.len() as u64 + 1;
            // Lines past the stream position were never shown
            if end > self.stream_bytes.max(self.covered_bytes) {
                self.fresh.push(ViewLine {
                    source: LineSource::LogFile,
                    text: line.to_string(),
                });
            }
            push_bounded(&mut self.log_lines, line.to_string(), self.config.log_capacity);
        }
        self.covered_bytes = covered;
        self.reloads += 1;
        true
    }

    /// Lines applied since the previous call, in arrival order.
    pub fn take_new_lines(&mut self) -> Vec<ViewLine> {
        std::mem::take(&mut self.fresh)
    }

    pub fn console(&self) -> impl Iterator<Item = &ViewLine> {
        self.console.iter()
    }

    pub fn log_lines(&self) -> impl Iterator<Item = &str> {
        self.log_lines.iter().map(String::as_str)
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    pub fn artifact(&self) -> Option<&Path> {
        self.artifact.as_deref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Number of full reloads from disk so far.
    pub fn reloads(&self) -> u32 {
        self.reloads
    }

    pub fn status(&self) -> RunStatus {
        match (&self.artifact, self.completed) {
            (_, false) => RunStatus::Running,
            (Some(artifact), true) => RunStatus::Complete {
                exit_code: self.exit_code,
                artifact: artifact.clone(),
            },
            (None, true) => RunStatus::CompleteNoArtifact {
                exit_code: self.exit_code,
            },
        }
    }
}

fn push_bounded<T>(buf: &mut VecDeque<T>, item: T, capacity: usize) {
    if buf.len() >= capacity.max(1) {
        buf.pop_front();
    }
    buf.push_back(item);
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
