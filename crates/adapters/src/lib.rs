// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the monitored process and the files it writes

pub mod artifact;
pub mod bridge;
pub mod catalog;
pub mod completion;
mod decode;
mod env;
pub mod process;
pub mod subprocess;
pub mod tail;

pub use artifact::{discover_artifact, newest_match};
pub use bridge::{EventBridge, EventDrain, DEFAULT_BRIDGE_CAPACITY};
pub use catalog::{list_recent, RecentFile};
pub use completion::{Completion, CompletionSignal, Detector};
pub use decode::decode_text;
pub use process::{
    launch, resolve_entry_point, EntryPoint, LaunchError, LaunchSpec, ProcessHandle,
    ProcessOutput, ProcessProbe,
};
pub use tail::{read_full_log, LogTailer, TailState, TailerConfig};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use process::{FakeProbe, ProbeCall};
