// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod files;
pub mod label;
pub mod run;

use crate::config::{ProjectConfig, CONFIG_FILE_NAME};
use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

/// Where the pipeline project lives and how it is configured.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Project root (default: nearest directory with runwatch.toml, else cwd)
    #[arg(long = "project", value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Config file (default: <project>/runwatch.toml)
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ProjectArgs {
    /// Resolve the project root and load its configuration.
    pub fn load(&self) -> Result<(PathBuf, ProjectConfig)> {
        let root = match &self.project {
            Some(dir) => dir
                .canonicalize()
                .with_context(|| format!("project directory {} not found", dir.display()))?,
            None => find_project_root(&std::env::current_dir()?),
        };
        let config = ProjectConfig::load(&root, self.config.as_deref())?;
        Ok((root, config))
    }
}

/// Walk up from `start` to the nearest directory holding a config file.
/// Falls back to `start` itself.
pub fn find_project_root(start: &Path) -> PathBuf {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE_NAME).is_file() {
            return current;
        }
        if !current.pop() {
            return start.to_path_buf();
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
