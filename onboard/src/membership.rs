//! Stage: add each roster email to the access group.
//!
//! Waits a settle delay first so freshly processed invitations are visible to
//! the group-add endpoint, then takes a sequential, paced pass. Membership is
//! the workflow's deliverable, so per-item failures are logged as errors and
//! counted; they still never abort the run.

use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::core::report::StageReport;
use crate::core::types::CallOutcome;
use crate::io::console;
use crate::io::pacer::Pacer;
use crate::io::provider::Provider;
use crate::io::roster::Roster;

/// Add every roster entry to `group`, pausing after each item.
///
/// A user already in the group counts as success: the stage's contract is
/// "the user is a member afterwards", which a re-run satisfies trivially.
pub fn add_all<P: Provider>(
    provider: &P,
    pacer: &mut dyn Pacer,
    group: &str,
    roster: &Roster,
    settle: Duration,
) -> StageReport {
    if !settle.is_zero() {
        console::info(format!(
            "waiting {}s for invitations to settle",
            settle.as_secs()
        ));
        debug!(settle_secs = settle.as_secs(), "settle delay");
        thread::sleep(settle);
    }

    let mut report = StageReport::default();
    for email in roster.iter() {
        match provider.add_user_to_group(group, email) {
            Ok(CallOutcome::Applied) => {
                report.record_success();
                console::success(format!("added {email} to '{group}'"));
            }
            Ok(CallOutcome::AlreadyExists) => {
                report.record_success();
                console::info(format!("{email} is already in '{group}'"));
            }
            Ok(CallOutcome::Rejected { message }) => {
                report.record_failure(email);
                warn!(email, message, "membership add rejected");
                console::error(format!("failed to add {email} to '{group}': {message}"));
            }
            Err(err) => {
                report.record_failure(email);
                warn!(email, err = %err, "membership call failed");
                console::error(format!("failed to add {email} to '{group}': {err:#}"));
            }
        }
        pacer.pause();
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CountingPacer, ScriptedProvider, roster_of};

    #[test]
    fn counts_cover_every_roster_entry() {
        let provider = ScriptedProvider::new()
            .with_add_outcome("b@x.com", CallOutcome::rejected("no such user"));
        let roster = roster_of(["a@x.com", "b@x.com", "c@x.com"]);
        let mut pacer = CountingPacer::default();

        let report = add_all(&provider, &mut pacer, "account-admins", &roster, Duration::ZERO);
        assert_eq!(report.succeeded + report.failed, roster.len());
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed_emails, vec!["b@x.com"]);
        assert_eq!(pacer.pauses, 3);
    }

    #[test]
    fn existing_membership_counts_as_success() {
        let provider =
            ScriptedProvider::new().with_add_outcome("a@x.com", CallOutcome::AlreadyExists);
        let roster = roster_of(["a@x.com"]);
        let mut pacer = CountingPacer::default();

        let report = add_all(&provider, &mut pacer, "account-admins", &roster, Duration::ZERO);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 0);
    }

    #[test]
    fn duplicate_entries_are_attempted_twice() {
        let provider = ScriptedProvider::new();
        let roster = roster_of(["dup@x.com", "dup@x.com"]);
        let mut pacer = CountingPacer::default();

        let report = add_all(&provider, &mut pacer, "account-admins", &roster, Duration::ZERO);
        assert_eq!(report.attempted, 2);
        assert_eq!(
            provider.calls(),
            vec!["add:dup@x.com", "add:dup@x.com"]
        );
    }
}
