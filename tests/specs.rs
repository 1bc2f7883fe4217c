//! Behavioral specifications for the rw CLI.
//!
//! These tests are black-box: they invoke the CLI binary and verify
//! stdout, stderr, exit codes, and the files a run leaves behind.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// cli/
#[path = "specs/cli/errors.rs"]
mod cli_errors;
#[path = "specs/cli/help.rs"]
mod cli_help;

// label/
#[path = "specs/label/clean.rs"]
mod label_clean;

// files/
#[path = "specs/files/listing.rs"]
mod files_listing;

// run/
#[path = "specs/run/completion.rs"]
mod run_completion;
#[path = "specs/run/streams.rs"]
mod run_streams;
