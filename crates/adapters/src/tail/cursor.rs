// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Byte-offset cursor over a growing log file.
//!
//! Tracks the last consumed byte offset so only content appended since
//! the previous read is touched, similar to how `tail -f` works. The offset
//! advances past complete lines only; an unterminated remainder is re-read
//! on the next call.

use super::TailError;
use crate::decode::decode_line;
use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Result of one cursor read.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CursorRead {
    /// Complete lines, without terminators, in file order
    pub lines: Vec<String>,
    /// Length or modification time moved since the last read
    pub grew: bool,
    /// The file shrank below the offset, which was reset to 0
    pub truncated: bool,
}

#[derive(Debug, Clone)]
pub struct LogCursor {
    path: PathBuf,
    created: SystemTime,
    offset: u64,
    last_len: u64,
    last_modified: Option<SystemTime>,
}

impl LogCursor {
    /// Start at offset 0 of `path`.
    pub fn new(path: impl Into<PathBuf>, created: SystemTime) -> Self {
        Self {
            path: path.into(),
            created,
            offset: 0,
            last_len: 0,
            last_modified: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn created(&self) -> SystemTime {
        self.created
    }

    /// Bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read complete lines appended since the last call.
    pub fn read_new(&mut self) -> Result<CursorRead, TailError> {
        let meta = self.stat()?;
        let len = meta.len();
        let modified = meta.modified().ok();

        let mut result = CursorRead::default();
        if len < self.offset {
            tracing::info!(
                path = %self.path.display(),
                offset = self.offset,
                len,
                "log file truncated, restarting from offset 0"
            );
            self.offset = 0;
            result.truncated = true;
        }

        let mtime_moved = match (modified, self.last_modified) {
            (Some(now), Some(before)) => now > before,
            (Some(_), None) => len > 0,
            _ => false,
        };
        result.grew = len > self.last_len || mtime_moved || result.truncated;
        if !result.grew {
            return Ok(result);
        }

        let bytes = self.read_from_offset()?;
        let consumed = bytes
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        result.lines = split_lines(&bytes[..consumed]);
        self.offset += consumed as u64;
        self.last_len = len;
        self.last_modified = modified;
        Ok(result)
    }

    /// Read everything left, including an unterminated last line, and move
    /// the offset to end of file.
    pub fn flush_remainder(&mut self) -> Result<Vec<String>, TailError> {
        let bytes = self.read_from_offset()?;
        let mut lines = split_lines(&bytes);
        if bytes.last().is_some_and(|&b| b != b'\n') {
            if let Some(rest) = bytes.rsplit(|&b| b == b'\n').next() {
                lines.push(decode_line(rest));
            }
        }
        self.offset += bytes.len() as u64;
        self.last_len = self.last_len.max(self.offset);
        Ok(lines)
    }

    fn stat(&self) -> Result<fs::Metadata, TailError> {
        fs::metadata(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                TailError::Missing(self.path.display().to_string())
            } else {
                TailError::Stat {
                    path: self.path.display().to_string(),
                    source,
                }
            }
        })
    }

    fn read_from_offset(&self) -> Result<Vec<u8>, TailError> {
        let read = || -> io::Result<Vec<u8>> {
            let mut file = File::open(&self.path)?;
            file.seek(SeekFrom::Start(self.offset))?;
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)?;
            Ok(bytes)
        };
        read().map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                TailError::Missing(self.path.display().to_string())
            } else {
                TailError::Read {
                    path: self.path.display().to_string(),
                    source,
                }
            }
        })
    }
}

/// Split bytes into terminated lines. A trailing unterminated piece is not
/// included.
fn split_lines(bytes: &[u8]) -> Vec<String> {
    bytes
        .split_inclusive(|&b| b == b'\n')
        .filter(|line| line.ends_with(b"\n"))
        .map(decode_line)
        .collect()
}

#[cfg(test)]
#[path = "cursor_tests.rs"]
mod tests;
