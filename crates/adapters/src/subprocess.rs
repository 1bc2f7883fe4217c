// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution helpers

use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;

/// Run a subprocess command with a timeout.
///
/// Wraps `Command::output()` with `tokio::time::timeout`, converting
/// timeout expiration into a descriptive error message. The child process
/// is killed automatically if the timeout elapses (via the tokio `Child`
/// drop implementation).
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    description: &str,
) -> Result<Output, String> {
    cmd.kill_on_drop(true);
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(io_err)) => Err(format!("{} failed: {}", description, io_err)),
        Err(_elapsed) => Err(format!(
            "{} timed out after {}s",
            description,
            timeout.as_secs()
        )),
    }
}

/// Send a signal with `kill(1)`. Returns whether the command succeeded.
pub async fn kill_signal(signal: &str, pid: u32) -> bool {
    let mut cmd = Command::new("kill");
    cmd.args([signal, &pid.to_string()])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    match run_with_timeout(cmd, crate::env::kill_timeout(), "kill").await {
        Ok(output) => output.status.success(),
        Err(e) => {
            tracing::warn!(pid, signal, error = %e, "kill command failed");
            false
        }
    }
}

/// Check the OS process table for `pid`.
///
/// A zombie still counts as existing until its parent reaps it.
pub async fn process_exists(pid: u32) -> bool {
    kill_signal("-0", pid).await
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
