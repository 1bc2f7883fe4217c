// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Liveness probing seam used by the tailer.

use super::ProcessHandle;
use async_trait::async_trait;

/// Answers "is the monitored process still running?"
#[async_trait]
pub trait ProcessProbe: Clone + Send + Sync + 'static {
    async fn is_alive(&self) -> bool;

    /// Exit code, if known.
    fn exit_code(&self) -> Option<i32>;
}

#[async_trait]
impl ProcessProbe for ProcessHandle {
    async fn is_alive(&self) -> bool {
        ProcessHandle::is_alive(self).await
    }

    fn exit_code(&self) -> Option<i32> {
        ProcessHandle::exit_code(self)
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Recorded probe call
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ProbeCall {
        IsAlive,
        ExitCode,
    }

    struct State {
        alive: bool,
        exit_code: Option<i32>,
        calls: Vec<ProbeCall>,
    }

    /// Scriptable probe for tests
    #[derive(Clone)]
    pub struct FakeProbe {
        state: Arc<Mutex<State>>,
    }

    impl Default for FakeProbe {
        fn default() -> Self {
            Self::new()
        }
    }

    impl FakeProbe {
        /// A probe that reports a live process.
        pub fn new() -> Self {
            Self {
                state: Arc::new(Mutex::new(State {
                    alive: true,
                    exit_code: None,
                    calls: Vec::new(),
                })),
            }
        }

        pub fn set_exited(&self, exit_code: Option<i32>) {
            let mut state = self.state.lock();
            state.alive = false;
            state.exit_code = exit_code;
        }

        pub fn calls(&self) -> Vec<ProbeCall> {
            self.state.lock().calls.clone()
        }
    }

    #[async_trait]
    impl ProcessProbe for FakeProbe {
        async fn is_alive(&self) -> bool {
            let mut state = self.state.lock();
            state.calls.push(ProbeCall::IsAlive);
            state.alive
        }

        fn exit_code(&self) -> Option<i32> {
            let mut state = self.state.lock();
            state.calls.push(ProbeCall::ExitCode);
            state.exit_code
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeProbe, ProbeCall};
