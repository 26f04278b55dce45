//! Roster file loading.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::roster::normalize_lines;

/// Roster file was not found at the given path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingRosterError {
    pub path: PathBuf,
}

impl fmt::Display for MissingRosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing roster file {}", self.path.display())
    }
}

impl std::error::Error for MissingRosterError {}

/// Normalized roster of invitee emails, in file order.
///
/// Iteration is restartable: stages take independent passes over the same
/// list. Duplicates are preserved (see `core::roster`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    emails: Vec<String>,
}

impl Roster {
    /// Build a roster from already-normalized emails.
    pub fn from_emails(emails: Vec<String>) -> Self {
        Self { emails }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.emails.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

/// Load and normalize a roster file.
///
/// Fails with [`MissingRosterError`] when the path does not exist.
pub fn load_roster(path: &Path) -> Result<Roster> {
    if !path.exists() {
        return Err(MissingRosterError {
            path: path.to_path_buf(),
        }
        .into());
    }
    let contents =
        fs::read_to_string(path).with_context(|| format!("read roster {}", path.display()))?;
    let emails = normalize_lines(&contents);
    debug!(path = %path.display(), count = emails.len(), "roster loaded");
    Ok(Roster { emails })
}
