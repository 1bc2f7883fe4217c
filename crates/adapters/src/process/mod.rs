// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline process launching and supervision

mod command;
mod entry;
mod handle;
mod probe;
mod reader;

pub use command::LaunchSpec;
pub use entry::{resolve_entry_point, EntryPoint, DEFAULT_PACKAGE_DIRS};
pub use handle::{launch, ProcessHandle, ProcessOutput, UNREAPED_EXIT_CODE};
pub use probe::ProcessProbe;
pub use reader::spawn_output_reader;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use probe::{FakeProbe, ProbeCall};

use std::path::PathBuf;
use thiserror::Error;

/// Errors from resolving or spawning the pipeline process
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no `{script}` entry point found under {}", root.display())]
    EntryPointNotFound { root: PathBuf, script: String },
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("spawned process has no {0} pipe")]
    MissingStdio(&'static str),
    #[error("spawned process exited before its pid could be read")]
    MissingPid,
}
