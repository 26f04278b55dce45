//! Classification of provider call failures.
//!
//! The provider CLI reports every failure as a non-zero exit with free-form
//! text. The workflow cares about one distinction: duplicate-class responses
//! (the resource is already in the desired state) versus genuine rejections.
//! Conflating the two would make re-runs look like failures, so the message
//! text and any embedded error codes are inspected here.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::types::CallOutcome;

/// Duplicate-class phrasings and error codes seen from the IAM surface.
static ALREADY_EXISTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)already exists|already a member|already invited|duplicate (?:policy|resource)|_already_exists",
    )
    .expect("already-exists pattern compiles")
});

/// Classify a failed provider call from its combined stdout/stderr text.
pub fn classify_failure(message: &str) -> CallOutcome {
    if ALREADY_EXISTS.is_match(message) {
        CallOutcome::AlreadyExists
    } else {
        CallOutcome::rejected(condense(message))
    }
}

/// Collapse CLI output into a single log-friendly line.
fn condense(message: &str) -> String {
    let line = message
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("; ");
    if line.is_empty() {
        "provider call failed with no output".to_string()
    } else {
        line
    }
}
