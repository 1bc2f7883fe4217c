// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use tempfile::TempDir;

// The global subscriber can only be installed once per test binary, so
// everything that needs it lives in a single test.
#[test]
#[serial]
fn init_writes_to_state_dir_and_rejects_second_install() {
    std::env::remove_var("RW_LOG");
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("state");

    let ctx = LoggingContext::init(Some(&state), false).unwrap();
    assert_eq!(ctx.log_path(), Some(state.join("rw.log").as_path()));
    tracing::info!(answer = 42, "hello from the test");

    assert!(matches!(
        LoggingContext::init(None, false),
        Err(LoggingError::AlreadyInstalled)
    ));

    ctx.shutdown();
    let written = std::fs::read_to_string(state.join("rw.log")).unwrap();
    assert!(written.contains("hello from the test"));
    assert!(written.contains("answer=42"));
}

#[test]
fn unwritable_state_dir_is_reported() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "").unwrap();

    let err = LoggingContext::init(Some(&blocker.join("state")), false)
        .err()
        .unwrap();
    assert!(matches!(err, LoggingError::CreateDir { .. }));
}
