// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listing of recent log and output files.

use rw_core::run_paths::display_name;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentFile {
    pub path: PathBuf,
    pub file_name: String,
    /// Title-cased label, or the file name if it is not conventionally named
    pub display_name: String,
    pub size: u64,
    pub modified: SystemTime,
}

/// The `limit` most recently modified `*.<extension>` files in `dir`.
///
/// A missing directory is an empty listing.
pub fn list_recent(dir: &Path, extension: &str, limit: usize) -> io::Result<Vec<RecentFile>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        let meta = match entry.metadata() {
            Ok(meta) if meta.is_file() => meta,
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let file_name = entry.file_name().to_string_lossy().into_owned();
        files.push(RecentFile {
            display_name: display_name(&file_name, extension),
            file_name,
            size: meta.len(),
            modified: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            path,
        });
    }

    files.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.file_name.cmp(&b.file_name)));
    files.truncate(limit);
    Ok(files)
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
