// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the adapters crate.

use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Timeout for `kill` invocations (default: 5000ms).
pub fn kill_timeout() -> Duration {
    parse_duration_ms("RW_KILL_TIMEOUT_MS").unwrap_or(Duration::from_secs(5))
}

/// Whether the tailer may use filesystem notifications for early wake-ups.
/// Disabled by setting `RW_NO_FS_WATCH` to any non-empty value.
pub fn fs_watch_enabled() -> bool {
    std::env::var("RW_NO_FS_WATCH").map_or(true, |v| v.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
