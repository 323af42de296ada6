//! Scrubbing of user supplied inputs
//!
//! Release workflows hand over loosely formatted values: type lists typed by
//! hand into a form, or full ref names where only a tag is wanted.

use std::sync::LazyLock;

use regex::Regex;

static LIST_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,]+").expect("Invalid regex"));

static TAG_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^refs/tags/(?P<tag>.+)$").expect("Invalid regex"));

/// Split a comma or whitespace separated list of commit types.
///
/// Items are lower-cased, empty items are dropped, and duplicates keep their
/// first position.
pub fn scrub_type_list(raw: &str) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();
    for item in LIST_SEPARATOR.split(raw.trim()) {
        let item = item.trim().to_lowercase();
        if !item.is_empty() && !types.contains(&item) {
            types.push(item);
        }
    }
    types
}

/// Extract the tag name from a ref string.
///
/// `refs/tags/v1.2.0` becomes `v1.2.0`; anything else is returned trimmed.
pub fn tag_from_ref(reference: &str) -> String {
    let reference = reference.trim();
    TAG_REF
        .captures(reference)
        .and_then(|caps| caps.name("tag"))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| reference.to_string())
}
