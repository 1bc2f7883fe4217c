//! `rw run` completion and output discovery specs

use crate::prelude::*;

#[test]
fn run_follows_pipeline_to_its_output() {
    let project = Project::with_pipeline(PIPELINE);
    project
        .rw()
        .args(&["run", "Artificial Intelligence"])
        .passes()
        .stdout_has("rw | cleaned label: Artificial_Intelligence")
        .stdout_has("log | INFO starting research on Artificial Intelligence")
        .stdout_has("log | INFO writing report")
        .stdout_has("complete (exit 0)")
        .stdout_has("output/Artificial_Intelligence_");

    let outputs = project.files_in("output");
    assert_eq!(outputs.len(), 1);
    assert!(outputs[0].starts_with("Artificial_Intelligence_"));
    assert!(outputs[0].ends_with(".md"));
}

#[test]
fn missing_output_is_reported_but_not_an_error() {
    let project = Project::with_pipeline("echo working\n");
    project
        .rw()
        .args(&["run", "AI"])
        .passes()
        .stdout_has("rw | no output file found matching")
        .stdout_has("incomplete (exit 0)")
        .stdout_has("output: none found");
}

#[test]
fn pipeline_failure_sets_exit_code() {
    let project = Project::with_pipeline("echo broken >&2\nexit 3\n");
    project
        .rw()
        .args(&["run", "AI"])
        .fails()
        .code_is(3)
        .stdout_has("err | broken")
        .stdout_has("rw | process completed with return code 3")
        .stdout_has("failed (exit 3)");
}

#[test]
fn run_time_limit_terminates_pipeline() {
    let project = Project::empty();
    project.file(
        "runwatch.toml",
        &FAST_CONFIG.replace("[timing]\n", "[timing]\nmax_run_time_ms = 300\n"),
    );
    project.file("main.py", "exec sleep 30\n");
    project
        .rw()
        .args(&["run", "AI"])
        .fails()
        .code_is(143)
        .stdout_has("process exceeded 300ms, terminating")
        .stdout_has("failed (exit 143)");
}

#[test]
fn explicit_entry_point_is_used() {
    let project = Project::empty();
    project.file("runwatch.toml", FAST_CONFIG);
    project.file("pipelines/report.sh", PIPELINE);
    project
        .rw()
        .args(&["run", "AI", "--entry", "pipelines/report.sh"])
        .passes()
        .stdout_has("report.sh run --topic AI")
        .stdout_has("complete (exit 0)");
}

#[test]
fn run_writes_diagnostics_to_state_dir() {
    let project = Project::with_pipeline(PIPELINE);
    project.rw().args(&["run", "AI"]).passes();
    let log = project.rw_log();
    assert!(log.contains("run started"), "{log}");
    assert!(log.contains("run finished"), "{log}");
}

#[test]
fn show_output_prints_the_report() {
    let project = Project::with_pipeline(PIPELINE);
    project
        .rw()
        .args(&["run", "AI", "--show-output"])
        .passes()
        .stdout_has("complete (exit 0)")
        .stdout_has("Output: ")
        .stdout_has("# Report on AI");
}

#[test]
fn show_output_without_a_report_prints_nothing_extra() {
    let project = Project::with_pipeline("echo working\n");
    project
        .rw()
        .args(&["run", "AI", "--show-output"])
        .passes()
        .stdout_has("output: none found")
        .stdout_lacks("Output: ");
}
