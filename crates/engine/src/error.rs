// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for starting a run

use rw_adapters::LaunchError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error(transparent)]
    Launch(#[from] LaunchError),
    #[error("label {0:?} is empty after cleaning")]
    EmptyLabel(String),
    #[error("project root {} is not a directory", .0.display())]
    ProjectRoot(PathBuf),
}
