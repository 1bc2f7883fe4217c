// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output artifact discovery.

use crate::tail::{list_matches, Candidate};
use rw_core::FilePattern;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

/// Default number of discovery attempts after completion.
pub const DEFAULT_DISCOVERY_ATTEMPTS: u32 = 10;

/// Default delay between discovery attempts.
pub const DEFAULT_DISCOVERY_DELAY: Duration = Duration::from_millis(500);

/// Newest file matching `pattern` modified at or after `not_before`.
pub fn newest_match(pattern: &FilePattern, not_before: SystemTime) -> Option<Candidate> {
    list_matches(pattern)
        .into_iter()
        .find(|c| c.modified >= not_before)
}

/// Poll for the output artifact up to `attempts` times, `delay` apart.
///
/// `None` means the run produced no artifact; that is not an error.
pub async fn discover_artifact(
    pattern: &FilePattern,
    attempts: u32,
    delay: Duration,
    not_before: SystemTime,
) -> Option<PathBuf> {
    let attempts = attempts.max(1);
    for attempt in 1..=attempts {
        if let Some(found) = newest_match(pattern, not_before) {
            tracing::info!(path = %found.path.display(), attempt, "output artifact found");
            return Some(found.path);
        }
        tracing::debug!(%pattern, attempt, attempts, "no output artifact yet");
        if attempt < attempts {
            tokio::time::sleep(delay).await;
        }
    }
    tracing::info!(%pattern, attempts, "no output artifact found");
    None
}

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod tests;
