// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use rw_core::{CleanLabel, RunPaths};
use std::fs::{self, File};
use std::path::Path;
use std::time::UNIX_EPOCH;
use tempfile::TempDir;

fn write_modified_at(path: &Path, secs: u64) {
    fs::write(path, "# report\n").unwrap();
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

fn output_pattern(dir: &Path) -> FilePattern {
    RunPaths::new(dir, dir, "md").output_pattern(&CleanLabel::new("AI"))
}

#[tokio::test]
async fn newest_modified_match_wins() {
    let dir = TempDir::new().unwrap();
    write_modified_at(&dir.path().join("AI_20250314_090000.md"), 100);
    let newer = dir.path().join("AI_20250314_080000.md");
    write_modified_at(&newer, 105);

    let found = discover_artifact(
        &output_pattern(dir.path()),
        DEFAULT_DISCOVERY_ATTEMPTS,
        DEFAULT_DISCOVERY_DELAY,
        UNIX_EPOCH,
    )
    .await;
    assert_eq!(found, Some(newer));
}

#[tokio::test(start_paused = true)]
async fn gives_up_after_bounded_attempts() {
    let dir = TempDir::new().unwrap();
    let start = tokio::time::Instant::now();

    let found = discover_artifact(
        &output_pattern(dir.path()),
        10,
        Duration::from_millis(500),
        UNIX_EPOCH,
    )
    .await;

    assert_eq!(found, None);
    // Nine sleeps between ten attempts
    assert_eq!(start.elapsed(), Duration::from_millis(4500));
}

#[tokio::test(start_paused = true)]
async fn files_modified_before_start_are_ignored() {
    let dir = TempDir::new().unwrap();
    write_modified_at(&dir.path().join("AI_20250314_090000.md"), 100);

    let found = discover_artifact(
        &output_pattern(dir.path()),
        3,
        Duration::from_millis(500),
        UNIX_EPOCH + Duration::from_secs(200),
    )
    .await;
    assert_eq!(found, None);
}

#[tokio::test(start_paused = true)]
async fn artifact_appearing_between_attempts_is_found() {
    let dir = TempDir::new().unwrap();
    let pattern = output_pattern(dir.path());
    let path = dir.path().join("AI_20250314_090000.md");

    let writer = {
        let path = path.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(1200)).await;
            fs::write(&path, "# late\n").unwrap();
        })
    };
    let found = discover_artifact(&pattern, 10, Duration::from_millis(500), UNIX_EPOCH).await;
    writer.await.unwrap();

    assert_eq!(found, Some(path));
}

#[test]
fn newest_match_skips_other_labels() {
    let dir = TempDir::new().unwrap();
    write_modified_at(&dir.path().join("AIX_20250314_090000.md"), 300);
    let mine = dir.path().join("AI_20250314_090000.md");
    write_modified_at(&mine, 100);

    let found = newest_match(&output_pattern(dir.path()), UNIX_EPOCH).unwrap();
    assert_eq!(found.path, mine);
}
