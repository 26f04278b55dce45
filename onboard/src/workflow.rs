//! Orchestration of the full provisioning run.
//!
//! Linear stage sequence with exactly two abort points (prerequisites and
//! group creation). Everything after the group exists is best-effort per
//! item: the run always reaches the final summary, which shows the live
//! provider state rather than trusting the accumulated counters alone.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use crate::core::policy::{ACCESS_GROUP_DESCRIPTION, ACCESS_GROUP_NAME};
use crate::core::report::RunSummary;
use crate::group::ensure_group;
use crate::invite::invite_all;
use crate::io::config::OnboardConfig;
use crate::io::confirm::ConfirmGate;
use crate::io::console;
use crate::io::pacer::Pacer;
use crate::io::provider::Provider;
use crate::io::roster::load_roster;
use crate::membership::add_all;
use crate::policies::assign_admin_policies;
use crate::prereqs::check_prereqs;

/// How a workflow invocation ended (short of a fatal error).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// Operator declined the confirmation gate; nothing was changed.
    Declined,
    /// All stages ran; per-stage reports aggregated.
    Completed(RunSummary),
}

/// Run the whole provisioning workflow against `provider`.
///
/// Fatal errors (`PrerequisiteError`, `GroupCreationError`, transport
/// failures while listing groups) propagate as `Err`; everything else lands
/// in the returned summary.
pub fn run_workflow<P: Provider, C: ConfirmGate>(
    provider: &P,
    confirm: &mut C,
    pacer: &mut dyn Pacer,
    roster_path: &Path,
    cfg: &OnboardConfig,
    assume_yes: bool,
) -> Result<WorkflowOutcome> {
    check_prereqs(provider, roster_path)?;
    let roster = load_roster(roster_path)?;
    info!(count = roster.len(), "prerequisites ok, roster loaded");
    console::info(format!(
        "{} user(s) to provision into access group '{ACCESS_GROUP_NAME}'",
        roster.len()
    ));

    if !assume_yes {
        let prompt = format!(
            "Invite {} user(s) and add them to '{ACCESS_GROUP_NAME}'?",
            roster.len()
        );
        if !confirm.confirm(&prompt)? {
            console::info("aborted by operator, nothing was changed");
            return Ok(WorkflowOutcome::Declined);
        }
    }

    console::heading("Access group");
    let group = ensure_group(provider, ACCESS_GROUP_NAME, ACCESS_GROUP_DESCRIPTION)?;

    console::heading("Policies");
    let policies = assign_admin_policies(provider, ACCESS_GROUP_NAME);

    console::heading("Invitations");
    let invites = invite_all(provider, pacer, &roster);

    console::heading("Group membership");
    let memberships = add_all(
        provider,
        pacer,
        ACCESS_GROUP_NAME,
        &roster,
        Duration::from_secs(cfg.settle_delay_secs),
    );

    let summary = RunSummary {
        group,
        policies,
        invites,
        memberships,
    };
    print_summary(&summary);
    print_live_state(provider, ACCESS_GROUP_NAME);

    Ok(WorkflowOutcome::Completed(summary))
}

fn print_summary(summary: &RunSummary) {
    console::heading("Summary");
    console::info(format!(
        "policies: {} applied, {} already present, {} rejected",
        summary.policies.applied, summary.policies.already_present, summary.policies.rejected
    ));
    console::info(format!(
        "invites: {}/{} succeeded",
        summary.invites.succeeded, summary.invites.attempted
    ));
    console::info(format!(
        "memberships: {}/{} succeeded",
        summary.memberships.succeeded, summary.memberships.attempted
    ));
    if !summary.memberships.failed_emails.is_empty() {
        console::error(format!(
            "not added to the group: {}",
            summary.memberships.failed_emails.join(", ")
        ));
    }
}

/// Query and print the live group state so the operator can verify the end
/// state directly. Query failures here are warnings, never fatal.
pub fn print_live_state<P: Provider>(provider: &P, group: &str) {
    console::heading(&format!("Live state of '{group}'"));

    match provider.describe_group(group) {
        Ok(description) => {
            for line in description.lines().filter(|l| !l.trim().is_empty()) {
                console::info(line.trim_end());
            }
        }
        Err(err) => console::warn(format!("could not describe group: {err:#}")),
    }

    match provider.list_group_members(group) {
        Ok(members) => {
            console::info(format!("{} member(s)", members.len()));
            for member in &members {
                console::info(format!("  {member}"));
            }
        }
        Err(err) => console::warn(format!("could not list members: {err:#}")),
    }

    match provider.list_group_policies(group) {
        Ok(policies) => {
            console::info(format!("{} policy grant(s)", policies.len()));
            for policy in &policies {
                console::info(format!("  {policy}"));
            }
        }
        Err(err) => console::warn(format!("could not list policies: {err:#}")),
    }
}
