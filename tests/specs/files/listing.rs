//! `rw files` specs

use crate::prelude::*;
use std::time::{Duration, SystemTime};

fn touch_at(project: &Project, path: &str, secs_ago: u64) {
    project.file(path, "x");
    let file = std::fs::File::options()
        .write(true)
        .open(project.path().join(path))
        .unwrap();
    file.set_modified(SystemTime::now() - Duration::from_secs(secs_ago))
        .unwrap();
}

#[test]
fn empty_project_lists_nothing() {
    let project = Project::empty();
    project
        .rw()
        .args(&["files"])
        .passes()
        .stdout_has("Outputs:")
        .stdout_has("Logs:")
        .stdout_has("(none)");
}

#[test]
fn files_are_newest_first_with_display_names() {
    let project = Project::empty();
    touch_at(&project, "output/machine_learning_20250101_090000.md", 300);
    touch_at(&project, "output/Artificial_Intelligence_20250102_100000.md", 10);
    touch_at(&project, "output/notes.txt", 1);

    let out = project
        .rw()
        .args(&["files", "--kind", "outputs"])
        .passes()
        .stdout_lacks("Logs:")
        .stdout_lacks("notes.txt")
        .stdout();
    let rows: Vec<&str> = out.lines().skip(1).collect();
    assert_eq!(rows.len(), 2, "{out}");
    assert!(rows[0].trim_start().starts_with("Artificial Intelligence"));
    assert!(rows[1].trim_start().starts_with("Machine Learning"));
}

#[test]
fn limit_caps_each_listing() {
    let project = Project::empty();
    for i in 0..4 {
        touch_at(&project, &format!("logs/AI_2025010{i}_000000.log"), 100 - i);
    }
    let out = project
        .rw()
        .args(&["files", "--kind", "logs", "--limit", "2"])
        .passes()
        .stdout();
    assert_eq!(out.lines().count(), 3, "{out}");
    assert!(out.contains("AI_20250103_000000.log"));
    assert!(!out.contains("AI_20250100_000000.log"));
}

#[test]
fn files_json_output() {
    let project = Project::empty();
    touch_at(&project, "logs/AI_20250101_000000.log", 5);
    let out = project
        .rw()
        .args(&["files", "-o", "json"])
        .passes()
        .stdout();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["logs"][0]["file_name"], "AI_20250101_000000.log");
    assert_eq!(json["logs"][0]["name"], "Ai");
    assert_eq!(json["outputs"], serde_json::json!([]));
}
