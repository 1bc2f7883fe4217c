//! CLI help output specs

use crate::prelude::*;

#[test]
fn rw_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn rw_help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("run")
        .stdout_has("files")
        .stdout_has("label");
}

#[test]
fn rw_run_help_shows_label_argument() {
    cli()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("<LABEL>")
        .stdout_has("--entry")
        .stdout_has("--project");
}

#[test]
fn rw_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}
