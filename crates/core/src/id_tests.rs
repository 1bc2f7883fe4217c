// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

crate::define_id! {
    /// Id type used only to exercise the macro.
    pub struct ProbeId;
}

#[test]
fn new_and_as_str() {
    let id = ProbeId::new("abc");
    assert_eq!(id.as_str(), "abc");
    assert_eq!(id.to_string(), "abc");
}

#[test]
fn conversions_and_comparisons() {
    let owned: ProbeId = String::from("owned").into();
    let borrowed: ProbeId = "owned".into();
    assert_eq!(owned, borrowed);
    assert_eq!(owned, "owned");
    assert_eq!(owned, *"owned");
}

#[yare::parameterized(
    shorter_than_limit = { "abc", 8, "abc" },
    exact_limit        = { "abcdefgh", 8, "abcdefgh" },
    truncated          = { "abcdefghij", 8, "abcdefgh" },
    multibyte          = { "ééééé", 2, "éé" },
)]
fn short_truncates_by_chars(raw: &str, n: usize, expected: &str) {
    assert_eq!(ProbeId::new(raw).short(n), expected);
}

#[test]
fn serde_is_transparent_string() {
    let id = ProbeId::new("run-1");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"run-1\"");
    let parsed: ProbeId = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, id);
}
