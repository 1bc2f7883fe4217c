// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use rw_core::LineSource;
use std::io::IsTerminal;

pub mod codes {
    /// Section headers: steel blue
    pub const HEADER: u8 = 74;
    /// Commands and literals: light grey
    pub const LITERAL: u8 = 250;
    /// Descriptions and context: medium grey
    pub const CONTEXT: u8 = 245;
    /// Muted / secondary text: darker grey
    pub const MUTED: u8 = 240;
}

/// Determine if color output should be enabled on stdout.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    forced().unwrap_or_else(|| std::io::stdout().is_terminal())
}

/// Same rules as [`should_colorize`], checked against stderr.
pub fn should_colorize_stderr() -> bool {
    forced().unwrap_or_else(|| std::io::stderr().is_terminal())
}

fn forced() -> Option<bool> {
    if crate::env::no_color() {
        return Some(false);
    }
    if crate::env::force_color() {
        return Some(true);
    }
    None
}

fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

const RESET: &str = "\x1b[0m";

/// Clap help styles using the same palette as the helpers below.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    let fg = |code| Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))));
    Styles::styled()
        .header(fg(codes::HEADER))
        .usage(fg(codes::HEADER))
        .literal(fg(codes::LITERAL))
        .placeholder(fg(codes::CONTEXT))
}

/// Format text with the header color (steel blue).
pub fn header(text: &str) -> String {
    paint256(codes::HEADER, text)
}

/// Format text with the context color (medium grey).
pub fn context(text: &str) -> String {
    paint256(codes::CONTEXT, text)
}

/// Format text with the muted color (darker grey).
pub fn muted(text: &str) -> String {
    paint256(codes::MUTED, text)
}

fn paint256(code: u8, text: &str) -> String {
    if should_colorize() {
        format!("{}{text}{RESET}", fg256(code))
    } else {
        text.to_string()
    }
}

/// Apply yellow (ANSI 33) to text, respecting color settings.
pub fn yellow(text: &str) -> String {
    if !should_colorize() {
        return text.to_string();
    }
    format!("\x1b[33m{text}{RESET}")
}

/// Color a line by where it came from: stderr yellow, monitor notices
/// muted, everything else plain.
pub fn line(source: LineSource, text: &str) -> String {
    match source {
        LineSource::Stderr => yellow(text),
        LineSource::Monitor => muted(text),
        LineSource::Stdout | LineSource::LogFile => text.to_string(),
    }
}

/// Colorize a status string based on its first word.
///
/// - Green: running, complete, completed
/// - Yellow: incomplete, terminated
/// - Red: failed, error
pub fn status(text: &str) -> String {
    if !should_colorize() {
        return text.to_string();
    }
    let lower = text.trim_start().to_lowercase();
    let first_word = lower
        .split(|c: char| !c.is_alphabetic())
        .next()
        .unwrap_or("");
    let code = match first_word {
        "running" | "complete" | "completed" => "\x1b[32m",
        "incomplete" | "terminated" => "\x1b[33m",
        "failed" | "error" => "\x1b[31m",
        _ => return text.to_string(),
    };
    format!("{code}{text}{RESET}")
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
