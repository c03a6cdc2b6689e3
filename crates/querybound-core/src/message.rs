//! Accept-message templates.
//!
//! Templates interpolate `{name}` placeholders. `queries` and `limit` are
//! always available; every other name must be a declared input field.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::BTreeMap;

/// Placeholders supplied by the checker rather than by the input stream.
pub const RESERVED_PLACEHOLDERS: [&str; 2] = ["queries", "limit"];

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{([a-z][a-z0-9_]*)\}").unwrap();
}

/// Names referenced by a template, in order of appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

/// Substitute every known placeholder; unknown ones are left verbatim.
pub fn render(template: &str, values: &BTreeMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
