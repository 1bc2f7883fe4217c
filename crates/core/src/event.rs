// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events flowing from background monitors to the render loop

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Where a line of text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineSource {
    /// Child process standard output
    Stdout,
    /// Child process standard error
    Stderr,
    /// The tailed log file
    LogFile,
    /// Notices produced by runwatch itself (discovery, errors, lifecycle)
    Monitor,
}

impl fmt::Display for LineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineSource::Stdout => write!(f, "stdout"),
            LineSource::Stderr => write!(f, "stderr"),
            LineSource::LogFile => write!(f, "log"),
            LineSource::Monitor => write!(f, "monitor"),
        }
    }
}

/// Messages published on the event bridge.
///
/// Serializes with `{"type": "line:appended", ...fields}` format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LogEvent {
    /// One complete line of text (without its terminator).
    #[serde(rename = "line:appended")]
    LineAppended { source: LineSource, text: String },

    /// The tailer started following this log file. Any log lines received
    /// afterwards belong to it.
    #[serde(rename = "log:selected")]
    LogFileSelected { path: PathBuf },

    /// A (newer) output artifact was found.
    #[serde(rename = "output:discovered")]
    OutputFileDiscovered { path: PathBuf },

    #[serde(rename = "process:lifecycle")]
    ProcessLifecycleChanged {
        running: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        exit_code: Option<i32>,
    },
}

impl LogEvent {
    pub fn line(source: LineSource, text: impl Into<String>) -> Self {
        LogEvent::LineAppended {
            source,
            text: text.into(),
        }
    }

    /// A monitor notice line.
    pub fn notice(text: impl Into<String>) -> Self {
        Self::line(LineSource::Monitor, text)
    }

    pub fn started() -> Self {
        LogEvent::ProcessLifecycleChanged {
            running: true,
            exit_code: None,
        }
    }

    pub fn finished(exit_code: Option<i32>) -> Self {
        LogEvent::ProcessLifecycleChanged {
            running: false,
            exit_code,
        }
    }

    /// Returns the text if this is a line read from the tailed log file.
    pub fn as_log_line(&self) -> Option<&str> {
        match self {
            LogEvent::LineAppended {
                source: LineSource::LogFile,
                text,
            } => Some(text),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LogEvent::LineAppended { .. } => "line:appended",
            LogEvent::LogFileSelected { .. } => "log:selected",
            LogEvent::OutputFileDiscovered { .. } => "output:discovered",
            LogEvent::ProcessLifecycleChanged { .. } => "process:lifecycle",
        }
    }

    /// Short one-line description for tracing output.
    pub fn log_summary(&self) -> String {
        let t = self.name();
        match self {
            LogEvent::LineAppended { source, text } => {
                format!("{t} source={source} len={}", text.len())
            }
            LogEvent::LogFileSelected { path } | LogEvent::OutputFileDiscovered { path } => {
                format!("{t} path={}", path.display())
            }
            LogEvent::ProcessLifecycleChanged {
                running,
                exit_code: Some(code),
            } => format!("{t} running={running} exit_code={code}"),
            LogEvent::ProcessLifecycleChanged { running, .. } => {
                format!("{t} running={running}")
            }
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
