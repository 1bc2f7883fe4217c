// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing setup for the CLI.
//!
//! Diagnostics go to `<state_dir>/rw.log` through a non-blocking writer.
//! Console output for the user is printed directly and never goes
//! through tracing, except with `--verbose`, which adds a stderr layer.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE_NAME: &str = "rw.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot create log directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
}

/// Owns the appender guard; dropping it flushes pending log lines.
pub struct LoggingContext {
    log_path: Option<PathBuf>,
    guard: Option<WorkerGuard>,
}

impl LoggingContext {
    /// Install the global subscriber.
    ///
    /// With no state directory only the optional stderr layer is installed.
    pub fn init(state_dir: Option<&Path>, verbose: bool) -> Result<Self, LoggingError> {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let directives = crate::env::log_filter().unwrap_or_else(|| "info".to_string());
        let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));

        let (file_layer, guard, log_path) = match state_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
                    path: dir.to_path_buf(),
                    source,
                })?;
                let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = fmt::layer().with_writer(writer).with_ansi(false);
                (Some(layer), Some(guard), Some(dir.join(LOG_FILE_NAME)))
            }
            None => (None, None, None),
        };
        let stderr_layer = verbose.then(|| {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(crate::color::should_colorize_stderr())
        });

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(stderr_layer)
            .try_init()
            .map_err(|_| LoggingError::AlreadyInstalled)?;

        Ok(Self { log_path, guard })
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// Flush and close the log file.
    pub fn shutdown(mut self) {
        tracing::debug!("logging shutdown");
        drop(self.guard.take());
    }
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
