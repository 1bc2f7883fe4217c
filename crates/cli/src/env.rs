// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;
use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

// --- State directory ---

/// Resolve state directory: RW_STATE_DIR > XDG_STATE_HOME/runwatch > ~/.local/state/runwatch
pub fn state_dir() -> Option<PathBuf> {
    if let Some(dir) = non_empty("RW_STATE_DIR") {
        return Some(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty("XDG_STATE_HOME") {
        return Some(PathBuf::from(xdg).join("runwatch"));
    }
    dirs::home_dir().map(|home| home.join(".local/state/runwatch"))
}

// --- Logging ---

/// Filter directives for the log file, e.g. `debug` or `rw_adapters=trace`
pub fn log_filter() -> Option<String> {
    non_empty("RW_LOG")
}

// --- Color ---

pub fn no_color() -> bool {
    std::env::var("NO_COLOR").is_ok_and(|v| v == "1")
}

pub fn force_color() -> bool {
    std::env::var("COLOR").is_ok_and(|v| v == "1")
}

// --- Timing ---

/// Render loop tick override
pub fn render_tick_ms() -> Option<Duration> {
    parse_duration_ms("RW_RENDER_TICK_MS")
}

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
