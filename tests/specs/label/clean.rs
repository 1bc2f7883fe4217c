//! `rw label` specs

use crate::prelude::*;

#[test]
fn label_shows_cleaned_form_and_patterns() {
    let project = Project::empty();
    project
        .rw()
        .args(&["label", "Artificial Intelligence"])
        .passes()
        .stdout_eq(
            "label:  Artificial_Intelligence\n\
             logs:   logs/Artificial_Intelligence_*.log\n\
             output: output/Artificial_Intelligence_*.md\n",
        );
}

#[test]
fn label_strips_symbols_and_truncates() {
    let project = Project::empty();
    let long = "The (very) long topic: quantum computing & cryptography in 2030!";
    let out = project.rw().args(&["label", long]).passes().stdout();
    let first = out.lines().next().unwrap();
    let label = first.trim_start_matches("label:").trim();
    assert_eq!(label, "The_very_long_topic_quantum_computing_cr");
    assert_eq!(label.chars().count(), 40);
}

#[test]
fn label_uses_configured_directories() {
    let project = Project::empty();
    project.file(
        "runwatch.toml",
        "logs_dir = \"var/logs\"\noutput_extension = \"txt\"\n",
    );
    project
        .rw()
        .args(&["label", "AI"])
        .passes()
        .stdout_has("logs:   var/logs/AI_*.log")
        .stdout_has("output: output/AI_*.txt");
}

#[test]
fn label_json_output() {
    let project = Project::empty();
    let out = project
        .rw()
        .args(&["label", "Rust & Go", "-o", "json"])
        .passes()
        .stdout();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["input"], "Rust & Go");
    assert_eq!(json["label"], "Rust_Go");
}
