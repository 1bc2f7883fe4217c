// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawned pipeline process and its liveness.

use super::{LaunchError, LaunchSpec};
use crate::subprocess;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::process::{Child, ChildStderr, ChildStdout, Command};
use tokio::time::Instant;

/// Exit code reported when the child could not be reaped.
pub const UNREAPED_EXIT_CODE: i32 = -1;

/// Interval between `try_wait` polls while waiting for exit.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long to wait for the child to be reaped after SIGKILL.
const KILL_REAP_WINDOW: Duration = Duration::from_secs(2);

struct Inner {
    pid: u32,
    started_at: SystemTime,
    cwd: PathBuf,
    argv: Vec<String>,
    child: Mutex<Child>,
    running: AtomicBool,
    exit_code: Mutex<Option<i32>>,
}

/// Handle to the spawned child. Clones share the same process.
#[derive(Clone)]
pub struct ProcessHandle {
    inner: Arc<Inner>,
}

/// The child's output pipes, handed to the output readers.
pub struct ProcessOutput {
    pub stdout: ChildStdout,
    pub stderr: ChildStderr,
}

/// Spawn the pipeline process described by `spec`.
pub fn launch(spec: &LaunchSpec) -> Result<(ProcessHandle, ProcessOutput), LaunchError> {
    let argv = spec.argv();
    let mut cmd = Command::new(&spec.interpreter);
    cmd.args(&argv[1..])
        .current_dir(&spec.cwd)
        .envs(spec.env.iter().map(|(k, v)| (k, v)))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let started_at = SystemTime::now();
    let mut child = cmd.spawn().map_err(|source| LaunchError::Spawn {
        program: spec.interpreter.clone(),
        source,
    })?;
    let pid = child.id().ok_or(LaunchError::MissingPid)?;
    let stdout = child.stdout.take().ok_or(LaunchError::MissingStdio("stdout"))?;
    let stderr = child.stderr.take().ok_or(LaunchError::MissingStdio("stderr"))?;

    tracing::info!(pid, cwd = %spec.cwd.display(), command = %spec.command_line(), "process launched");

    let handle = ProcessHandle {
        inner: Arc::new(Inner {
            pid,
            started_at,
            cwd: spec.cwd.clone(),
            argv,
            child: Mutex::new(child),
            running: AtomicBool::new(true),
            exit_code: Mutex::new(None),
        }),
    };
    Ok((handle, ProcessOutput { stdout, stderr }))
}

impl ProcessHandle {
    pub fn pid(&self) -> u32 {
        self.inner.pid
    }

    pub fn started_at(&self) -> SystemTime {
        self.inner.started_at
    }

    pub fn cwd(&self) -> &Path {
        &self.inner.cwd
    }

    pub fn argv(&self) -> &[String] {
        &self.inner.argv
    }

    /// Last known liveness, without probing.
    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::Acquire)
    }

    /// Recorded exit code, once the exit has been observed.
    pub fn exit_code(&self) -> Option<i32> {
        *self.inner.exit_code.lock()
    }

    /// Probe liveness: a direct `try_wait` on the child first, then the OS
    /// process table. Either one reporting death means dead.
    pub async fn is_alive(&self) -> bool {
        if !self.is_running() {
            return false;
        }
        if self.try_wait().is_some() {
            return false;
        }
        if !subprocess::process_exists(self.pid()).await {
            tracing::debug!(pid = self.pid(), "process missing from process table");
            self.record_exit(None);
            return false;
        }
        true
    }

    /// Non-blocking reap. Returns the exit code if the child has exited.
    pub fn try_wait(&self) -> Option<i32> {
        if let Some(code) = self.exit_code() {
            return Some(code);
        }
        let status = {
            let mut child = self.inner.child.lock();
            child.try_wait()
        };
        match status {
            Ok(Some(status)) => {
                let code = exit_code_of(status);
                self.record_exit(Some(code));
                Some(code)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(pid = self.pid(), error = %e, "try_wait failed");
                None
            }
        }
    }

    /// Wait up to `timeout` for the child to exit.
    pub async fn wait_timeout(&self, timeout: Duration) -> Option<i32> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(code) = self.try_wait() {
                return Some(code);
            }
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            tokio::time::sleep(WAIT_POLL_INTERVAL.min(deadline - now)).await;
        }
    }

    /// Stop the child: SIGTERM, wait up to `timeout`, then SIGKILL.
    ///
    /// Returns the exit code (`128 + signal` for signal deaths), or
    /// [`UNREAPED_EXIT_CODE`] if the child could not be reaped.
    pub async fn terminate(&self, timeout: Duration) -> i32 {
        if let Some(code) = self.try_wait() {
            return code;
        }
        let pid = self.pid();
        tracing::info!(pid, "terminating process");
        if !subprocess::kill_signal("-TERM", pid).await {
            tracing::debug!(pid, "SIGTERM not delivered");
        }
        if let Some(code) = self.wait_timeout(timeout).await {
            return code;
        }

        tracing::warn!(pid, timeout_ms = timeout.as_millis() as u64, "process ignored SIGTERM, killing");
        if let Err(e) = self.inner.child.lock().start_kill() {
            tracing::warn!(pid, error = %e, "SIGKILL failed");
        }
        match self.wait_timeout(KILL_REAP_WINDOW).await {
            Some(code) => code,
            None => {
                tracing::error!(pid, "process could not be reaped");
                self.record_exit(Some(UNREAPED_EXIT_CODE));
                UNREAPED_EXIT_CODE
            }
        }
    }

    fn record_exit(&self, code: Option<i32>) {
        {
            let mut exit_code = self.inner.exit_code.lock();
            if exit_code.is_none() {
                *exit_code = code;
            }
        }
        if self.inner.running.swap(false, Ordering::AcqRel) {
            tracing::info!(pid = self.pid(), exit_code = ?code, "process exited");
        }
    }
}

fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    UNREAPED_EXIT_CODE
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
