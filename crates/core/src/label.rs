// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Input label cleaning.
//!
//! The pipeline names its log and output files after the input label, so
//! both sides must derive the same file-name-safe form from the raw text.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Maximum number of characters kept in a cleaned label.
pub const MAX_LABEL_CHARS: usize = 40;

// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("constant regex pattern is valid"));

/// Clean a raw label for use in file names.
///
/// Drops every character that is neither a word character nor whitespace,
/// replaces whitespace runs with `_`, and keeps at most
/// [`MAX_LABEL_CHARS`] characters.
pub fn clean_label(raw: &str) -> String {
    let stripped = NON_WORD.replace_all(raw, "");
    let joined = WHITESPACE_RUN.replace_all(&stripped, "_");
    joined.chars().take(MAX_LABEL_CHARS).collect()
}

/// A label that has been through [`clean_label`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CleanLabel(String);

impl CleanLabel {
    pub fn new(raw: &str) -> Self {
        Self(clean_label(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CleanLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[path = "label_tests.rs"]
mod tests;
