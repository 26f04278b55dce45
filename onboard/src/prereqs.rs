//! Prerequisite checks run before anything else.
//!
//! All three checks (provider CLI reachable, operator authenticated, roster
//! file present) are fatal: the workflow refuses to start without them.

use std::fmt;
use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::io::provider::Provider;

/// A prerequisite was not met; the run aborts before any mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrerequisiteError {
    pub reason: String,
}

impl PrerequisiteError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PrerequisiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "prerequisite failed: {}", self.reason)
    }
}

impl std::error::Error for PrerequisiteError {}

/// Verify the provider CLI is reachable, the operator is logged in, and the
/// roster file exists.
pub fn check_prereqs<P: Provider>(provider: &P, roster_path: &Path) -> Result<()> {
    debug!(roster = %roster_path.display(), "checking prerequisites");

    let authenticated = match provider.is_authenticated() {
        Ok(authenticated) => authenticated,
        Err(err) => {
            return Err(PrerequisiteError::new(format!(
                "provider CLI unreachable: {err:#}"
            ))
            .into());
        }
    };
    if !authenticated {
        return Err(
            PrerequisiteError::new("not logged in to the provider (run `ibmcloud login`)").into(),
        );
    }

    if !roster_path.exists() {
        return Err(PrerequisiteError::new(format!(
            "missing roster file {}",
            roster_path.display()
        ))
        .into());
    }

    Ok(())
}
