// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rw files` - List recent log and output files of the project

use anyhow::Result;
use clap::{Args, ValueEnum};
use rw_adapters::{list_recent, RecentFile};
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

use super::ProjectArgs;
use crate::color;
use crate::output::{format_local_time, format_size, print_json, rfc3339_local, OutputFormat};

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum FileKind {
    Logs,
    Outputs,
    #[default]
    All,
}

#[derive(Args)]
pub struct FilesArgs {
    /// Maximum files listed per kind
    #[arg(short = 'n', long = "limit", default_value_t = 10)]
    pub limit: usize,

    /// Which files to list
    #[arg(long = "kind", value_enum, default_value_t)]
    pub kind: FileKind,

    #[command(flatten)]
    pub project: ProjectArgs,
}

#[derive(Debug, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub file_name: String,
    pub path: String,
    pub size: u64,
    pub modified: String,
}

impl From<&RecentFile> for FileEntry {
    fn from(file: &RecentFile) -> Self {
        Self {
            name: file.display_name.clone(),
            file_name: file.file_name.clone(),
            path: file.path.display().to_string(),
            size: file.size,
            modified: rfc3339_local(file.modified),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct Listing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<FileEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<FileEntry>>,
}

pub fn handle(args: FilesArgs, format: OutputFormat) -> Result<()> {
    let (root, config) = args.project.load()?;
    let paths = config.run_paths().rooted_at(&root);

    let wants_logs = matches!(args.kind, FileKind::Logs | FileKind::All);
    let wants_outputs = matches!(args.kind, FileKind::Outputs | FileKind::All);
    let logs = if wants_logs {
        Some(list_recent(&paths.logs_dir, "log", args.limit)?)
    } else {
        None
    };
    let outputs = if wants_outputs {
        Some(list_recent(&paths.output_dir, &paths.output_extension, args.limit)?)
    } else {
        None
    };

    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            if let Some(outputs) = &outputs {
                render_section(&mut out, "Outputs", &paths.output_dir, outputs);
            }
            if let Some(logs) = &logs {
                if !out.is_empty() {
                    out.push('\n');
                }
                render_section(&mut out, "Logs", &paths.logs_dir, logs);
            }
            print!("{out}");
        }
        OutputFormat::Json => {
            let listing = Listing {
                logs: logs.map(|files| files.iter().map(FileEntry::from).collect()),
                outputs: outputs.map(|files| files.iter().map(FileEntry::from).collect()),
            };
            print_json(&listing)?;
        }
    }
    Ok(())
}

/// One titled block of files, newest first.
pub fn render_section(out: &mut String, title: &str, dir: &Path, files: &[RecentFile]) {
    let _ = writeln!(
        out,
        "{} {}",
        color::header(&format!("{title}:")),
        color::context(&dir.display().to_string())
    );
    if files.is_empty() {
        let _ = writeln!(out, "  {}", color::muted("(none)"));
        return;
    }
    let width = files
        .iter()
        .map(|f| f.display_name.chars().count())
        .max()
        .unwrap_or(0);
    for file in files {
        let _ = writeln!(
            out,
            "  {:<width$}  {}  {:>8}  {}",
            file.display_name,
            format_local_time(file.modified),
            format_size(file.size),
            color::muted(&file.file_name),
        );
    }
}

#[cfg(test)]
#[path = "files_tests.rs"]
mod tests;
