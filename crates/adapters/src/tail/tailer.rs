// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log file tailer.
//!
//! Searches for the run's log file, follows its growth as line events,
//! switches to a newer file on rotation, and decides when following is
//! over. State machine:
//!
//! ```text
//! Searching ──found──▶ Tailing ──removed / idle after exit / ceiling──▶ Ended
//!     └──────timeout / exited early──▶ GaveUp
//! ```

use super::candidates::{list_matches, Candidate};
use super::cursor::LogCursor;
use super::watch::DirWatch;
use super::TailError;
use crate::bridge::EventBridge;
use crate::completion::{CompletionSignal, Detector};
use crate::process::ProcessProbe;
use rw_core::{FilePattern, LineSource, LogEvent};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::time::Instant;

/// Timing knobs for the tailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailerConfig {
    /// Interval between reads while tailing
    pub poll_interval: Duration,
    /// Interval between glob scans while searching
    pub search_poll_interval: Duration,
    pub heartbeat_interval: Duration,
    pub max_search_wait: Duration,
    /// How long the log must stay idle after the process exits
    pub inactivity_grace: Duration,
    /// Hard ceiling on time spent tailing, across rotations
    pub max_tail_duration: Duration,
    /// Files created up to this long before the process start still count
    pub clock_skew: Duration,
    /// Wake early on filesystem notifications
    pub watch_fs: bool,
}

impl Default for TailerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(200),
            search_poll_interval: Duration::from_millis(500),
            heartbeat_interval: Duration::from_secs(10),
            max_search_wait: Duration::from_secs(90),
            inactivity_grace: Duration::from_secs(15),
            max_tail_duration: Duration::from_secs(3600),
            clock_skew: Duration::from_secs(1),
            watch_fs: crate::env::fs_watch_enabled(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailState {
    Searching,
    Tailing,
    /// No log file ever appeared
    GaveUp,
    Ended,
}

impl TailState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TailState::GaveUp | TailState::Ended)
    }
}

pub struct LogTailer<P: ProcessProbe> {
    config: TailerConfig,
    pattern: FilePattern,
    not_before: SystemTime,
    probe: P,
    bridge: EventBridge,
    completion: CompletionSignal,
    state: TailState,
    cursor: Option<LogCursor>,
    /// Files rotated away from; never read again
    retired: HashSet<PathBuf>,
    search_started: Instant,
    last_heartbeat: Instant,
    tail_started: Instant,
    last_activity: Instant,
    dead_since: Option<Instant>,
}

impl<P: ProcessProbe> LogTailer<P> {
    /// Create a tailer for files matching `pattern` created after
    /// `process_start` (less the configured clock skew).
    pub fn new(
        config: TailerConfig,
        pattern: FilePattern,
        process_start: SystemTime,
        probe: P,
        bridge: EventBridge,
        completion: CompletionSignal,
    ) -> Self {
        let not_before = process_start
            .checked_sub(config.clock_skew)
            .unwrap_or(process_start);
        let now = Instant::now();
        Self {
            config,
            pattern,
            not_before,
            probe,
            bridge,
            completion,
            state: TailState::Searching,
            cursor: None,
            retired: HashSet::new(),
            search_started: now,
            last_heartbeat: now,
            tail_started: now,
            last_activity: now,
            dead_since: None,
        }
    }

    pub fn state(&self) -> TailState {
        self.state
    }

    /// Path of the file being followed.
    pub fn current_file(&self) -> Option<&Path> {
        self.cursor.as_ref().map(LogCursor::path)
    }

    /// Bytes consumed from the current file.
    pub fn offset(&self) -> Option<u64> {
        self.cursor.as_ref().map(LogCursor::offset)
    }

    /// Poll until a terminal state, sleeping between polls and waking
    /// early on filesystem changes in the logs directory.
    pub async fn run(mut self) -> TailState {
        let mut watch = if self.config.watch_fs {
            DirWatch::new(&self.pattern.dir)
        } else {
            DirWatch::disabled()
        };
        tracing::debug!(pattern = %self.pattern, fs_watch = watch.is_active(), "tailer started");

        loop {
            let state = self.poll_once().await;
            if state.is_terminal() {
                tracing::info!(?state, "tailer stopped");
                return state;
            }
            let interval = match state {
                TailState::Searching => self.config.search_poll_interval,
                _ => self.config.poll_interval,
            };
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = watch.changed() => {}
            }
        }
    }

    /// Run one poll cycle and return the resulting state.
    pub async fn poll_once(&mut self) -> TailState {
        match self.state {
            TailState::Searching => self.poll_searching().await,
            TailState::Tailing => self.poll_tailing().await,
            TailState::GaveUp | TailState::Ended => {}
        }
        self.state
    }

    fn fresh_candidates(&self) -> impl Iterator<Item = Candidate> + '_ {
        list_matches(&self.pattern)
            .into_iter()
            .filter(|c| c.created > self.not_before && !self.retired.contains(&c.path))
    }

    async fn poll_searching(&mut self) {
        let now = Instant::now();
        let found = self.fresh_candidates().next();
        if let Some(candidate) = found {
            tracing::info!(
                path = %candidate.path.display(),
                elapsed_ms = (now - self.search_started).as_millis() as u64,
                "log file found"
            );
            self.tail_started = now;
            self.select(candidate, now);
            self.poll_tailing().await;
            return;
        }

        let searching_for = now - self.search_started;
        if now - self.last_heartbeat >= self.config.heartbeat_interval {
            self.last_heartbeat = now;
            tracing::info!(pattern = %self.pattern, elapsed_s = searching_for.as_secs(), "still searching for log file");
            self.notice(format!(
                "still searching for log file {} ({}s)",
                self.pattern,
                searching_for.as_secs()
            ));
        }

        if !self.probe.is_alive().await {
            self.completion
                .fire(Detector::LivenessPoll, self.probe.exit_code());
            let dead_since = *self.dead_since.get_or_insert(now);
            if now - dead_since >= self.config.inactivity_grace {
                tracing::warn!(pattern = %self.pattern, "process exited before any log file appeared");
                self.notice(format!(
                    "process exited and no log file matching {} appeared",
                    self.pattern
                ));
                self.state = TailState::GaveUp;
                return;
            }
        }

        if searching_for >= self.config.max_search_wait {
            tracing::warn!(
                pattern = %self.pattern,
                waited_s = searching_for.as_secs(),
                "gave up waiting for log file"
            );
            self.notice(format!(
                "no log file matching {} after {}s",
                self.pattern,
                searching_for.as_secs()
            ));
            self.state = TailState::GaveUp;
        }
    }

    async fn poll_tailing(&mut self) {
        let now = Instant::now();
        self.check_rotation(now);

        let Some(cursor) = self.cursor.as_mut() else {
            self.state = TailState::Ended;
            return;
        };
        match cursor.read_new() {
            Ok(read) => {
                if read.truncated {
                    self.bridge.publish(LogEvent::LogFileSelected {
                        path: cursor.path().to_path_buf(),
                    });
                    self.bridge.publish(LogEvent::notice(format!(
                        "log file {} was truncated, reading from the start",
                        cursor.path().display()
                    )));
                }
                if read.grew {
                    self.last_activity = now;
                }
                for line in read.lines {
                    self.bridge.publish(LogEvent::line(LineSource::LogFile, line));
                }
            }
            Err(e @ TailError::Read { .. }) => {
                tracing::warn!(error = %e, "log read failed, will retry");
            }
            Err(e) => {
                tracing::warn!(error = %e, "stopped following log file");
                self.notice(e.to_string());
                self.state = TailState::Ended;
                return;
            }
        }

        if !self.probe.is_alive().await {
            let exit_code = self.probe.exit_code();
            self.completion.fire(Detector::LivenessPoll, exit_code);
            self.dead_since.get_or_insert(now);
            let idle = now - self.last_activity;
            if idle >= self.config.inactivity_grace {
                self.flush_remainder();
                self.completion.fire(Detector::TailerInactivity, exit_code);
                tracing::info!(idle_s = idle.as_secs(), "process exited and log is idle");
                self.notice(format!(
                    "process ended and log idle for {}s, stopped following",
                    idle.as_secs()
                ));
                self.state = TailState::Ended;
                return;
            }
        }

        let tailing_for = now - self.tail_started;
        if tailing_for >= self.config.max_tail_duration {
            tracing::warn!(limit_s = self.config.max_tail_duration.as_secs(), "tail time limit reached");
            self.notice(format!(
                "stopped following log after {}s limit",
                tailing_for.as_secs()
            ));
            self.state = TailState::Ended;
        }
    }

    /// Switch to a file created strictly later than the current one.
    fn check_rotation(&mut self, now: Instant) {
        let Some(cursor) = self.cursor.as_ref() else {
            return;
        };
        let (current, created) = (cursor.path().to_path_buf(), cursor.created());
        let newer = self
            .fresh_candidates()
            .find(|c| c.created > created && c.path != current);
        if let Some(newer) = newer {
            tracing::info!(
                from = %current.display(),
                to = %newer.path.display(),
                "log file rotated"
            );
            self.retired.insert(current);
            self.select(newer, now);
        }
    }

    fn select(&mut self, candidate: Candidate, now: Instant) {
        self.bridge.publish(LogEvent::LogFileSelected {
            path: candidate.path.clone(),
        });
        self.notice(format!("following log file {}", candidate.path.display()));
        self.cursor = Some(LogCursor::new(candidate.path, candidate.created));
        self.state = TailState::Tailing;
        self.last_activity = now;
    }

    fn flush_remainder(&mut self) {
        let Some(cursor) = self.cursor.as_mut() else {
            return;
        };
        match cursor.flush_remainder() {
            Ok(lines) => {
                for line in lines {
                    self.bridge.publish(LogEvent::line(LineSource::LogFile, line));
                }
            }
            Err(e) => tracing::warn!(error = %e, "final log read failed"),
        }
    }

    fn notice(&self, text: String) {
        self.bridge.publish(LogEvent::notice(text));
    }
}

#[cfg(test)]
#[path = "tailer_tests.rs"]
mod tests;
