// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Child output readers.

use crate::bridge::EventBridge;
use crate::decode::decode_line;
use rw_core::{LineSource, LogEvent};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;

/// Spawn a task that publishes each line of `stream` until EOF.
///
/// A read error is published as a monitor notice and ends this reader
/// only. The task resolves to the number of lines published.
pub fn spawn_output_reader<R>(stream: R, source: LineSource, bridge: EventBridge) -> JoinHandle<u64>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(stream);
        let mut buf = Vec::new();
        let mut lines = 0u64;
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    bridge.publish(LogEvent::line(source, decode_line(&buf)));
                    lines += 1;
                }
                Err(e) => {
                    tracing::warn!(%source, error = %e, "output read failed");
                    bridge.publish(LogEvent::notice(format!("error reading {source}: {e}")));
                    break;
                }
            }
        }
        tracing::debug!(%source, lines, "output stream closed");
        lines
    })
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
