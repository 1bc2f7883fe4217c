// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entry point discovery for pipeline projects.

use super::LaunchError;
use std::fs;
use std::path::{Path, PathBuf};

/// Package directories searched for `<dir>/<sub>/<script>`.
pub const DEFAULT_PACKAGE_DIRS: &[&str] = &["src", "source", "app"];

/// How the interpreter should be pointed at the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryPoint {
    /// Run a script file
    Script(PathBuf),
    /// Run a dotted module path with `-m`
    Module(String),
}

/// Locate the pipeline entry point under `root`.
///
/// Search order:
/// 1. `explicit`, if given and it exists (relative paths resolve against `root`)
/// 2. `<root>/<script_name>`
/// 3. `<root>/<dir>/<sub>/<script_name>` for each package dir, subdirectories in sorted order
/// 4. module `<dir>.<sub>.<stem>` when both `<dir>` and `<dir>/<sub>` are packages
pub fn resolve_entry_point(
    root: &Path,
    explicit: Option<&Path>,
    script_name: &str,
    package_dirs: &[String],
) -> Result<EntryPoint, LaunchError> {
    if let Some(explicit) = explicit {
        let path = root.join(explicit);
        if path.is_file() {
            return Ok(EntryPoint::Script(path));
        }
        tracing::warn!(path = %path.display(), "explicit entry point not found, searching");
    }

    let direct = root.join(script_name);
    if direct.is_file() {
        return Ok(EntryPoint::Script(direct));
    }

    for dir in package_dirs {
        for sub in sorted_subdirs(&root.join(dir)) {
            let candidate = root.join(dir).join(&sub).join(script_name);
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "found entry point in package dir");
                return Ok(EntryPoint::Script(candidate));
            }
        }
    }

    let stem = Path::new(script_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(script_name);
    for dir in package_dirs {
        let package = root.join(dir);
        if !package.join("__init__.py").is_file() {
            continue;
        }
        if let Some(sub) = sorted_subdirs(&package)
            .into_iter()
            .find(|sub| package.join(sub).join("__init__.py").is_file())
        {
            let module = format!("{dir}.{sub}.{stem}");
            tracing::debug!(module, "falling back to module entry point");
            return Ok(EntryPoint::Module(module));
        }
    }

    Err(LaunchError::EntryPointNotFound {
        root: root.to_path_buf(),
        script: script_name.to_string(),
    })
}

fn sorted_subdirs(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .collect();
    names.sort();
    names
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
