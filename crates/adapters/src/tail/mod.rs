// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log file discovery and tailing

mod candidates;
mod cursor;
mod tailer;
mod watch;

pub use candidates::{list_matches, Candidate};
pub use cursor::{CursorRead, LogCursor};
pub use tailer::{LogTailer, TailState, TailerConfig};
pub use watch::DirWatch;

use crate::decode::decode_text;
use std::path::Path;
use thiserror::Error;

/// Errors from reading the watched log file
#[derive(Debug, Error)]
pub enum TailError {
    #[error("log file no longer exists: {0}")]
    Missing(String),
    #[error("could not stat log file {path}: {source}")]
    Stat {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not read log file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read a whole log file, decoding UTF-8 with a Latin-1 fallback.
pub fn read_full_log(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(decode_text(&bytes))
}
