//! CLI error reporting specs

use crate::prelude::*;

#[test]
fn unknown_subcommand_fails() {
    cli().args(&["frobnicate"]).fails().code_is(2);
}

#[test]
fn run_without_entry_point_fails_before_spawning() {
    let project = Project::empty();
    project.file("runwatch.toml", FAST_CONFIG);
    project
        .rw()
        .args(&["run", "AI"])
        .fails()
        .code_is(1)
        .stderr_has("no `main.py` entry point found");
    assert!(project.files_in("logs").is_empty());
}

#[test]
fn run_with_unusable_label_fails() {
    let project = Project::with_pipeline(PIPELINE);
    project
        .rw()
        .args(&["run", "?!"])
        .fails()
        .stderr_has("empty after cleaning");
}

#[test]
fn invalid_config_names_the_file() {
    let project = Project::empty();
    project.file("runwatch.toml", "interpreter = [");
    project
        .rw()
        .args(&["label", "AI"])
        .fails()
        .stderr_has("runwatch.toml");
}

#[test]
fn missing_project_dir_is_reported() {
    let project = Project::empty();
    project
        .rw()
        .args(&["files", "--project", "does-not-exist"])
        .fails()
        .stderr_has("not found");
}
