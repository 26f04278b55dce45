//! Per-stage result aggregation.
//!
//! Each stage returns a report value instead of incrementing shared
//! counters; the orchestrator folds them into a [`RunSummary`] that decides
//! the process exit code. Keeping this pure makes every stage independently
//! testable.

use crate::core::types::GroupOutcome;
use crate::exit_codes;

/// Counters for a per-item stage (invites, membership adds).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Emails whose call failed, in processing order.
    pub failed_emails: Vec<String>,
}

impl StageReport {
    pub fn record_success(&mut self) {
        self.attempted += 1;
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, email: &str) {
        self.attempted += 1;
        self.failed += 1;
        self.failed_emails.push(email.to_string());
    }
}

/// Counters for the policy stage. All outcomes are non-fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyReport {
    pub applied: usize,
    pub already_present: usize,
    pub rejected: usize,
}

impl PolicyReport {
    pub fn attempted(&self) -> usize {
        self.applied + self.already_present + self.rejected
    }
}

/// Aggregated outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub group: GroupOutcome,
    pub policies: PolicyReport,
    pub invites: StageReport,
    pub memberships: StageReport,
}

impl RunSummary {
    /// Exit code for a run that reached the summary stage.
    ///
    /// Membership is the deliverable: any failed add downgrades the run to
    /// [`exit_codes::PARTIAL`]. Invite failures alone do not, since the
    /// membership stage is the authority on whether the user landed in the
    /// group.
    pub fn exit_code(&self) -> i32 {
        if self.memberships.failed > 0 {
            exit_codes::PARTIAL
        } else {
            exit_codes::OK
        }
    }
}
