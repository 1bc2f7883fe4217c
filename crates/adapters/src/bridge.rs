// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event bridge from background monitors to the render loop.
//!
//! Any number of producers publish [`LogEvent`]s without blocking. A single
//! [`EventDrain`] owned by the render loop takes everything published so
//! far on each tick. Events from one producer are drained in the order that
//! producer published them.

use parking_lot::Mutex;
use rw_core::LogEvent;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Default bound on undrained events.
pub const DEFAULT_BRIDGE_CAPACITY: usize = 50_000;

struct Queue {
    events: VecDeque<LogEvent>,
    capacity: Option<usize>,
    dropped: u64,
}

/// Producer side of the bridge. Cheap to clone; one clone per task.
#[derive(Clone)]
pub struct EventBridge {
    queue: Arc<Mutex<Queue>>,
    wake_tx: mpsc::Sender<()>,
}

/// Consumer side of the bridge.
pub struct EventDrain {
    queue: Arc<Mutex<Queue>>,
    wake_rx: mpsc::Receiver<()>,
}

impl EventBridge {
    /// Create a bridge holding at most `capacity` undrained events
    /// (`None` for unbounded).
    ///
    /// Returns both the producer handle and the drain.
    pub fn new(capacity: Option<usize>) -> (Self, EventDrain) {
        let queue = Arc::new(Mutex::new(Queue {
            events: VecDeque::new(),
            capacity,
            dropped: 0,
        }));
        let (wake_tx, wake_rx) = mpsc::channel(1);

        (
            Self {
                queue: Arc::clone(&queue),
                wake_tx,
            },
            EventDrain { queue, wake_rx },
        )
    }

    /// Append an event. Never blocks on the consumer.
    ///
    /// When the bridge is full the oldest undrained event is discarded
    /// and counted.
    pub fn publish(&self, event: LogEvent) {
        tracing::trace!(event = %event.log_summary(), "publish");
        {
            let mut queue = self.queue.lock();
            if let Some(cap) = queue.capacity {
                while queue.events.len() >= cap.max(1) {
                    queue.events.pop_front();
                    queue.dropped += 1;
                }
            }
            queue.events.push_back(event);
        }
        // Non-blocking wake - if the channel is full, the drain is already awake
        let _ = self.wake_tx.try_send(());
    }
}

impl EventDrain {
    /// Take every event published so far, oldest first. Never blocks.
    pub fn drain_all(&self) -> Vec<LogEvent> {
        let mut queue = self.queue.lock();
        queue.events.drain(..).collect()
    }

    /// Wait until at least one event is pending.
    ///
    /// Returns `false` once every producer has been dropped and nothing is
    /// left to drain.
    pub async fn changed(&mut self) -> bool {
        loop {
            if self.pending() > 0 {
                return true;
            }
            if self.wake_rx.recv().await.is_none() {
                // All producers dropped
                return self.pending() > 0;
            }
        }
    }

    /// Number of undrained events.
    pub fn pending(&self) -> usize {
        self.queue.lock().events.len()
    }

    /// Number of events discarded because the bridge was full.
    pub fn dropped(&self) -> u64 {
        self.queue.lock().dropped
    }
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod tests;
