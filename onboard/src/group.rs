//! Stage: ensure the target access group exists.
//!
//! Idempotent create-or-skip. An existing group is success (warned, not
//! errored); a failed create is fatal because every later stage depends on
//! the group being there.

use std::fmt;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::types::{CallOutcome, GroupOutcome};
use crate::io::console;
use crate::io::provider::Provider;

/// The provider rejected group creation; the run aborts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCreationError {
    pub name: String,
    pub message: String,
}

impl fmt::Display for GroupCreationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to create access group '{}': {}",
            self.name, self.message
        )
    }
}

impl std::error::Error for GroupCreationError {}

/// Ensure an access group named `name` exists.
pub fn ensure_group<P: Provider>(
    provider: &P,
    name: &str,
    description: &str,
) -> Result<GroupOutcome> {
    let groups = provider
        .list_access_groups()
        .context("list access groups")?;
    debug!(count = groups.len(), "listed access groups");

    if groups.iter().any(|g| g == name) {
        console::warn(format!("access group '{name}' already exists, reusing it"));
        return Ok(GroupOutcome::AlreadyExists);
    }

    match provider
        .create_access_group(name, description)
        .context("create access group")?
    {
        CallOutcome::Applied => {
            info!(group = name, "access group created");
            console::success(format!("created access group '{name}'"));
            Ok(GroupOutcome::Created)
        }
        // Lost a race with a concurrent create; same end state.
        CallOutcome::AlreadyExists => {
            console::warn(format!("access group '{name}' already exists, reusing it"));
            Ok(GroupOutcome::AlreadyExists)
        }
        CallOutcome::Rejected { message } => Err(GroupCreationError {
            name: name.to_string(),
            message,
        }
        .into()),
    }
}
