// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Run monitoring: launches the pipeline, wires the background tasks to
//! the event bridge, and folds events into a view for the render loop.

mod config;
mod error;
mod monitor;
mod view;

pub use config::MonitorConfig;
pub use error::MonitorError;
pub use monitor::{start, ActiveRun};
pub use view::{RunStatus, RunView, TickOutcome, ViewConfig, ViewLine};
