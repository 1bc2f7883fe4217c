// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem notifications used to wake the tailer between polls.
//!
//! Polling stays the source of truth; a missed or coalesced notification
//! only delays the next read until the regular poll.

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use tokio::sync::mpsc;

/// Watches one directory (non-recursively) for any change.
pub struct DirWatch {
    // Dropping the watcher stops notifications
    _watcher: Option<RecommendedWatcher>,
    rx: Option<mpsc::Receiver<()>>,
}

impl DirWatch {
    /// Watch `dir`, or return an inert watch if that is not possible
    /// (missing directory, watcher limit reached).
    pub fn new(dir: &Path) -> Self {
        match create_dir_watcher(dir) {
            Ok((watcher, rx)) => Self {
                _watcher: Some(watcher),
                rx: Some(rx),
            },
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "file watcher unavailable, polling only");
                Self::disabled()
            }
        }
    }

    /// A watch that never fires.
    pub fn disabled() -> Self {
        Self {
            _watcher: None,
            rx: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.rx.is_some()
    }

    /// Wait for the next change notification. Pends forever when inactive.
    pub async fn changed(&mut self) {
        match self.rx.as_mut() {
            Some(rx) => {
                if rx.recv().await.is_none() {
                    // Watcher thread is gone; fall back to polling only
                    self.rx = None;
                    std::future::pending::<()>().await;
                }
            }
            None => std::future::pending::<()>().await,
        }
    }
}

fn create_dir_watcher(
    dir: &Path,
) -> Result<(RecommendedWatcher, mpsc::Receiver<()>), notify::Error> {
    let (tx, rx) = mpsc::channel(1);
    let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
        if res.is_ok() {
            // Coalesce bursts; one pending wake-up is enough
            let _ = tx.try_send(());
        }
    })?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok((watcher, rx))
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
