// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text decoding for bytes read from pipes and log files.

/// Decode bytes as UTF-8, falling back to Latin-1 when they are not valid
/// UTF-8. Latin-1 maps every byte to a char, so decoding never fails.
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Strip one trailing `\n` or `\r\n`.
pub fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Decode one raw line into text without its terminator.
pub fn decode_line(line: &[u8]) -> String {
    decode_text(trim_line_ending(line))
}

#[cfg(test)]
#[path = "decode_tests.rs"]
mod tests;
