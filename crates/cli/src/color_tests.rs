// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn force_color() {
    std::env::set_var("COLOR", "1");
    std::env::remove_var("NO_COLOR");
}

fn disable_color() {
    std::env::set_var("NO_COLOR", "1");
    std::env::remove_var("COLOR");
}

#[test]
#[serial]
fn styles_returns_styled_when_color_forced() {
    force_color();
    let debug = format!("{:?}", styles());
    assert_ne!(debug, format!("{:?}", Styles::plain()));
}

#[test]
#[serial]
fn styles_returns_plain_when_no_color() {
    disable_color();
    let debug = format!("{:?}", styles());
    assert_eq!(debug, format!("{:?}", Styles::plain()));
}

#[test]
#[serial]
fn palette_helpers_emit_256_color_codes() {
    force_color();
    assert_eq!(header("foo"), "\x1b[38;5;74mfoo\x1b[0m");
    assert_eq!(context("baz"), "\x1b[38;5;245mbaz\x1b[0m");
    assert_eq!(muted("dim"), "\x1b[38;5;240mdim\x1b[0m");
}

#[test]
#[serial]
fn helpers_plain_when_no_color() {
    disable_color();
    assert_eq!(header("foo"), "foo");
    assert_eq!(context("baz"), "baz");
    assert_eq!(muted("dim"), "dim");
    assert_eq!(line(LineSource::Stderr, "warn"), "warn");
}

#[test]
#[serial]
fn no_color_overrides_force() {
    std::env::set_var("NO_COLOR", "1");
    std::env::set_var("COLOR", "1");
    assert!(!should_colorize(), "NO_COLOR=1 should override COLOR=1");
    assert!(!should_colorize_stderr());
}

#[test]
#[serial]
fn line_colors_follow_source() {
    force_color();
    assert_eq!(line(LineSource::Stderr, "err"), "\x1b[33merr\x1b[0m");
    assert_eq!(line(LineSource::Monitor, "note"), "\x1b[38;5;240mnote\x1b[0m");
    assert_eq!(line(LineSource::Stdout, "out"), "out");
    assert_eq!(line(LineSource::LogFile, "INFO"), "INFO");
}

#[yare::parameterized(
    running    = { "running", "\x1b[32m" },
    complete   = { "complete (exit 0)", "\x1b[32m" },
    incomplete = { "incomplete: no output", "\x1b[33m" },
    failed     = { "failed (exit 2)", "\x1b[31m" },
)]
#[serial]
fn status_colors_by_first_word(text: &str, code: &str) {
    force_color();
    let result = status(text);
    assert!(result.starts_with(code), "{result:?}");
    assert!(result.contains(text));
}

#[test]
#[serial]
fn status_leaves_unknown_words_alone() {
    force_color();
    assert_eq!(status("mystery"), "mystery");
}
