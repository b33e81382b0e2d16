//! Free-text recipe name normalization.
//!
//! `"alpHa-alFRedo"` becomes `"Alpha Alfredo"`; `"meat_ball!!"` becomes
//! `"Meat Ball"`. Only input that collapses to nothing normalizes to
//! `None`; surrounding spaces survive as a single space.

use regex::Regex;
use std::sync::LazyLock;

static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_]").unwrap());
static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z ]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalize a handwritten name to title-cased words separated by single spaces.
pub fn normalize(raw: &str) -> Option<String> {
    let spaced = SEPARATORS.replace_all(raw, " ");
    let letters = DISALLOWED.replace_all(&spaced, "");
    let collapsed = WHITESPACE.replace_all(&letters, " ");
    let lowered = collapsed.to_lowercase();

    if lowered.is_empty() {
        return None;
    }

    let words: Vec<String> = lowered.split(' ').map(capitalize).collect();
    Some(words.join(" "))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
