// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rw-core: Core types shared by the runwatch crates

pub mod event;
pub mod id;
pub mod label;
pub mod run;
pub mod run_paths;

pub use event::{LineSource, LogEvent};
pub use label::{clean_label, CleanLabel, MAX_LABEL_CHARS};
pub use run::RunId;
pub use run_paths::{FilePattern, RunPaths};
