// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn summary(status: Outcome, exit_code: Option<i32>) -> RunSummary {
    RunSummary {
        run_id: "run-1".to_string(),
        label: "AI".to_string(),
        pid: 42,
        status,
        exit_code,
        log_file: Some(PathBuf::from("/p/logs/AI_20250101_000000.log")),
        output_file: None,
        log_lines: 3,
        reloads: 0,
        dropped_events: 0,
    }
}

#[yare::parameterized(
    complete      = { RunStatus::Complete { exit_code: Some(0), artifact: PathBuf::from("o.md") }, false, Outcome::Complete },
    no_artifact   = { RunStatus::CompleteNoArtifact { exit_code: Some(0) }, false, Outcome::Incomplete },
    nonzero       = { RunStatus::CompleteNoArtifact { exit_code: Some(2) }, false, Outcome::Failed },
    nonzero_out   = { RunStatus::Complete { exit_code: Some(1), artifact: PathBuf::from("o.md") }, false, Outcome::Failed },
    unknown_code  = { RunStatus::CompleteNoArtifact { exit_code: None }, false, Outcome::Failed },
    interrupted   = { RunStatus::CompleteNoArtifact { exit_code: Some(143) }, true, Outcome::Terminated },
)]
fn outcome_classification(status: RunStatus, interrupted: bool, expected: Outcome) {
    assert_eq!(Outcome::classify(&status, interrupted), expected);
}

#[test]
#[serial]
fn line_has_source_tag() {
    std::env::set_var("NO_COLOR", "1");
    let line = ViewLine {
        source: LineSource::LogFile,
        text: "INFO start".to_string(),
    };
    assert_eq!(format_line(&line), "log | INFO start");
    let line = ViewLine {
        source: LineSource::Monitor,
        text: "process started".to_string(),
    };
    assert_eq!(format_line(&line), " rw | process started");
}

#[test]
fn json_line_uses_snake_case_source() {
    let line = ViewLine {
        source: LineSource::Stderr,
        text: "oops".to_string(),
    };
    assert_eq!(
        json_line(&line),
        serde_json::json!({ "source": "stderr", "text": "oops" })
    );
}

#[test]
#[serial]
fn summary_text_lists_files() {
    std::env::set_var("NO_COLOR", "1");
    let text = render_summary(&summary(Outcome::Incomplete, Some(0)));
    assert_eq!(
        text,
        "incomplete (exit 0)\n  log:    /p/logs/AI_20250101_000000.log\n  output: none found\n"
    );
}

#[test]
#[serial]
fn summary_mentions_dropped_events() {
    std::env::set_var("NO_COLOR", "1");
    let mut s = summary(Outcome::Complete, None);
    s.dropped_events = 7;
    s.reloads = 1;
    let text = render_summary(&s);
    assert!(text.starts_with("complete (exit unknown)\n"));
    assert!(text.ends_with("  7 events dropped, log reloaded 1 times\n"));
}

#[test]
fn summary_serializes_status_in_snake_case() {
    let json = serde_json::to_value(summary(Outcome::Terminated, Some(143))).unwrap();
    assert_eq!(json["status"], "terminated");
    assert_eq!(json["exit_code"], 143);
    assert_eq!(json["output_file"], serde_json::Value::Null);
}

#[test]
#[serial]
fn output_contents_follow_a_header() {
    std::env::set_var("NO_COLOR", "1");
    let text = render_output(Path::new("/p/output/AI_1.md"), "# Report\nbody");
    assert_eq!(text, "\nOutput: /p/output/AI_1.md\n# Report\nbody\n");
}
