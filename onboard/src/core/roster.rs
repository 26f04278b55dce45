//! Roster line normalization.
//!
//! A roster is a plain-text file with one email per line. Blank lines and
//! `#`-prefixed comment lines are skipped; everything else is trimmed and
//! yielded verbatim, in file order. No email-format validation happens here:
//! the provider is the authority on what constitutes a valid address.

/// Filter and trim roster lines.
///
/// Duplicates are preserved deliberately: every provider call downstream is
/// idempotent, and pass-through keeps per-stage counters aligned with the
/// non-skipped input lines.
pub fn normalize_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
