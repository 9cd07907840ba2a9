//! Post-processing for generated résumé text.
//!
//! Models tend to repeat themselves; these passes drop repeated lines and
//! squeeze out the blank space left behind.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_BEFORE_NEWLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+\n").expect("valid regex"));
static NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").expect("valid regex"));

/// Drops blank lines and every repeat of an earlier line.
///
/// Lines are trimmed before comparison; matching is exact and case-sensitive,
/// and the first occurrence keeps its position.
pub fn remove_repetition(text: &str) -> String {
    let mut seen = HashSet::new();
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && seen.insert(*line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strips whitespace before each newline, collapses newline runs, trims the ends.
pub fn normalize_whitespace(text: &str) -> String {
    let text = WHITESPACE_BEFORE_NEWLINE.replace_all(text, "\n");
    let text = NEWLINE_RUN.replace_all(&text, "\n");
    text.trim().to_string()
}

/// Full cleanup applied to every generation before it is shown or stored.
pub fn clean_generated_text(text: &str) -> String {
    normalize_whitespace(&remove_repetition(text))
}
