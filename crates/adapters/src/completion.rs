// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! First-detector-wins completion signal.
//!
//! Several tasks can notice that the child has exited: the supervisor's
//! wait, the tailer's liveness poll, and the tailer's inactivity timeout.
//! Only the first one publishes the lifecycle transition.

use crate::bridge::EventBridge;
use rw_core::LogEvent;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Which monitor noticed the exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detector {
    ProcessWait,
    LivenessPoll,
    TailerInactivity,
}

impl fmt::Display for Detector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Detector::ProcessWait => write!(f, "process_wait"),
            Detector::LivenessPoll => write!(f, "liveness_poll"),
            Detector::TailerInactivity => write!(f, "tailer_inactivity"),
        }
    }
}

/// The winning detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub detector: Detector,
    pub exit_code: Option<i32>,
}

struct Inner {
    fired: AtomicBool,
    bridge: EventBridge,
    done_tx: watch::Sender<Option<Completion>>,
}

/// Shared latch; clone one into each detector.
#[derive(Clone)]
pub struct CompletionSignal {
    inner: Arc<Inner>,
}

impl CompletionSignal {
    pub fn new(bridge: EventBridge) -> Self {
        let (done_tx, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                fired: AtomicBool::new(false),
                bridge,
                done_tx,
            }),
        }
    }

    /// Record completion. Returns `true` only for the first caller, which
    /// also publishes `ProcessLifecycleChanged { running: false }`.
    pub fn fire(&self, detector: Detector, exit_code: Option<i32>) -> bool {
        if self.inner.fired.swap(true, Ordering::AcqRel) {
            tracing::debug!(%detector, ?exit_code, "completion already recorded");
            return false;
        }
        tracing::info!(%detector, ?exit_code, "process complete");
        self.inner.bridge.publish(LogEvent::finished(exit_code));
        self.inner
            .done_tx
            .send_replace(Some(Completion { detector, exit_code }));
        true
    }

    pub fn is_fired(&self) -> bool {
        self.inner.fired.load(Ordering::Acquire)
    }

    pub fn completion(&self) -> Option<Completion> {
        *self.inner.done_tx.borrow()
    }

    /// Resolve once some detector has fired.
    pub async fn wait(&self) -> Completion {
        let mut rx = self.inner.done_tx.subscribe();
        loop {
            if let Some(done) = *rx.borrow_and_update() {
                return done;
            }
            // The sender lives as long as `self`, so the channel cannot close
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
#[path = "completion_tests.rs"]
mod tests;
