//! `rw run` stream separation specs

use crate::prelude::*;

#[test]
fn console_streams_are_tagged_separately() {
    let project = Project::with_pipeline(PIPELINE);
    project
        .rw()
        .args(&["run", "AI"])
        .passes()
        .stdout_has("out | agent stdout line")
        .stdout_has("err | agent stderr line")
        .stdout_lacks("log | agent stdout line");
}

#[test]
fn log_lines_arrive_once_and_in_order() {
    let project = Project::with_pipeline(PIPELINE);
    let out = project.rw().args(&["run", "AI"]).passes().stdout();
    let log_lines: Vec<&str> = out
        .lines()
        .filter_map(|l| l.strip_prefix("log | "))
        .collect();
    assert_eq!(
        log_lines,
        vec!["INFO starting research on AI", "INFO writing report"]
    );
}

#[test]
fn json_output_is_one_object_per_line() {
    let project = Project::with_pipeline(PIPELINE);
    let out = project
        .rw()
        .args(&["run", "AI", "-o", "json"])
        .passes()
        .stdout();

    let objects: Vec<serde_json::Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert!(objects
        .iter()
        .any(|o| o["source"] == "log_file" && o["text"] == "INFO writing report"));
    assert!(objects
        .iter()
        .any(|o| o["source"] == "stderr" && o["text"] == "agent stderr line"));

    let summary = &objects.last().unwrap()["summary"];
    assert_eq!(summary["status"], "complete");
    assert_eq!(summary["exit_code"], 0);
    assert_eq!(summary["label"], "AI");
    assert!(summary["output_file"]
        .as_str()
        .unwrap()
        .contains("output/AI_"));
}
