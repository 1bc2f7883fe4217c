// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Naming conventions for the files a monitored pipeline writes.
//!
//! The pipeline writes:
//!   `<logs_dir>/<label>_<YYYYMMDD>_<HHMMSS>.log`
//!   `<output_dir>/<label>_<YYYYMMDD>_<HHMMSS>.<extension>`

use crate::label::CleanLabel;
use chrono::NaiveDateTime;
use std::fmt;
use std::path::{Path, PathBuf};

/// Timestamp format embedded in log and output file names.
pub const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// A `<dir>/<prefix>*<suffix>` file name pattern.
///
/// Kept structured rather than as a glob string so the directory part can
/// be escaped by whoever turns it into a glob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePattern {
    pub dir: PathBuf,
    pub prefix: String,
    pub suffix: String,
}

impl FilePattern {
    /// Whether a bare file name matches `<prefix>*<suffix>`.
    pub fn matches_name(&self, file_name: &str) -> bool {
        file_name.len() >= self.prefix.len() + self.suffix.len()
            && file_name.starts_with(&self.prefix)
            && file_name.ends_with(&self.suffix)
    }
}

impl fmt::Display for FilePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}*{}",
            self.dir.display(),
            self.prefix,
            self.suffix
        )
    }
}

/// Directory layout of a pipeline project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub logs_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Output file extension, without the dot
    pub output_extension: String,
}

impl RunPaths {
    pub fn new(
        logs_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        output_extension: impl Into<String>,
    ) -> Self {
        Self {
            logs_dir: logs_dir.into(),
            output_dir: output_dir.into(),
            output_extension: output_extension.into(),
        }
    }

    /// Resolve relative directories against the project root.
    pub fn rooted_at(&self, root: &Path) -> Self {
        Self {
            logs_dir: root.join(&self.logs_dir),
            output_dir: root.join(&self.output_dir),
            output_extension: self.output_extension.clone(),
        }
    }

    /// Pattern matching every log file of a label: `<logs_dir>/<label>_*.log`
    pub fn log_pattern(&self, label: &CleanLabel) -> FilePattern {
        FilePattern {
            dir: self.logs_dir.clone(),
            prefix: format!("{label}_"),
            suffix: ".log".to_string(),
        }
    }

    /// Pattern matching every output artifact of a label.
    pub fn output_pattern(&self, label: &CleanLabel) -> FilePattern {
        FilePattern {
            dir: self.output_dir.clone(),
            prefix: format!("{label}_"),
            suffix: format!(".{}", self.output_extension),
        }
    }

    /// Path of the log file a pipeline started at `at` would write.
    pub fn log_file_path(&self, label: &CleanLabel, at: NaiveDateTime) -> PathBuf {
        self.logs_dir
            .join(format!("{label}_{}.log", at.format(FILE_STAMP_FORMAT)))
    }

    /// Path of the output artifact a pipeline finishing at `at` would write.
    pub fn output_file_path(&self, label: &CleanLabel, at: NaiveDateTime) -> PathBuf {
        self.output_dir.join(format!(
            "{label}_{}.{}",
            at.format(FILE_STAMP_FORMAT),
            self.output_extension
        ))
    }
}

impl Default for RunPaths {
    fn default() -> Self {
        Self::new("logs", "output", "md")
    }
}

/// Split `<label>_<YYYYMMDD>_<HHMMSS>.<extension>` into label and stamp.
pub fn parse_stamped_name(file_name: &str, extension: &str) -> Option<(String, NaiveDateTime)> {
    let stem = file_name.strip_suffix(extension)?.strip_suffix('.')?;
    let mut parts = stem.rsplitn(3, '_');
    let time = parts.next()?;
    let date = parts.next()?;
    let label = parts.next().filter(|l| !l.is_empty())?;
    let is_digits = |s: &str, n: usize| s.len() == n && s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(date, 8) || !is_digits(time, 6) {
        return None;
    }
    let stamp = NaiveDateTime::parse_from_str(&format!("{date}_{time}"), FILE_STAMP_FORMAT).ok()?;
    Some((label.to_string(), stamp))
}

/// Human-friendly name for an output file: `Artificial_Intelligence_20250101_120000.md`
/// becomes `Artificial Intelligence`. Names that do not follow the
/// convention are returned unchanged.
pub fn display_name(file_name: &str, extension: &str) -> String {
    let Some((label, _)) = parse_stamped_name(file_name, extension) else {
        return file_name.to_string();
    };
    label
        .split('_')
        .filter(|w| !w.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "run_paths_tests.rs"]
mod tests;
