// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Files matching a run's naming pattern.

use rw_core::FilePattern;
use std::path::PathBuf;
use std::time::SystemTime;

/// A file matching a pattern, with the timestamps used to rank it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    /// Birth time where the filesystem records one, otherwise mtime
    pub created: SystemTime,
    pub modified: SystemTime,
}

/// Every regular file matching `pattern`, newest modification first.
///
/// The directory part is escaped, so only the `*` between prefix and
/// suffix acts as a wildcard.
pub fn list_matches(pattern: &FilePattern) -> Vec<Candidate> {
    let glob_str = format!(
        "{}/{}*{}",
        glob::Pattern::escape(&pattern.dir.to_string_lossy()),
        glob::Pattern::escape(&pattern.prefix),
        glob::Pattern::escape(&pattern.suffix),
    );
    let paths = match glob::glob(&glob_str) {
        Ok(paths) => paths,
        Err(e) => {
            tracing::warn!(pattern = %glob_str, error = %e, "invalid glob pattern");
            return Vec::new();
        }
    };

    let mut found: Vec<Candidate> = paths
        .filter_map(Result::ok)
        .filter_map(|path| {
            let meta = std::fs::metadata(&path).ok()?;
            if !meta.is_file() {
                return None;
            }
            let modified = meta.modified().ok()?;
            let created = meta.created().unwrap_or(modified);
            Some(Candidate {
                path,
                created,
                modified,
            })
        })
        .collect();
    found.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| b.path.cmp(&a.path)));
    found
}

#[cfg(test)]
#[path = "candidates_tests.rs"]
mod tests;
