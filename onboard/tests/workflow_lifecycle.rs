//! End-to-end workflow scenarios driven through scripted fakes.
//!
//! These tests exercise the full stage sequence: prerequisites, confirmation
//! gate, group ensure, policy assignment, invitations, membership adds, and
//! the final summary, verifying ordering and abort behavior.

use std::fs;
use std::path::PathBuf;

use onboard::core::types::{CallOutcome, GroupOutcome};
use onboard::exit_codes;
use onboard::group::GroupCreationError;
use onboard::io::config::OnboardConfig;
use onboard::prereqs::PrerequisiteError;
use onboard::test_support::{CountingPacer, ScriptedConfirm, ScriptedProvider};
use onboard::workflow::{WorkflowOutcome, run_workflow};

fn write_roster(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("users.txt");
    fs::write(&path, contents).expect("write roster");
    (temp, path)
}

fn fast_config() -> OnboardConfig {
    OnboardConfig {
        settle_delay_secs: 0,
        ..OnboardConfig::default()
    }
}

#[test]
fn full_run_walks_every_stage_in_order() {
    let (_temp, roster) = write_roster("alice@x.com\n# comment\n\nbob@x.com");
    let provider = ScriptedProvider::new().with_members(["alice@x.com", "bob@x.com"]);
    let mut confirm = ScriptedConfirm::new(true);
    let mut pacer = CountingPacer::default();

    let outcome = run_workflow(
        &provider,
        &mut confirm,
        &mut pacer,
        &roster,
        &fast_config(),
        false,
    )
    .expect("workflow");

    let summary = match outcome {
        WorkflowOutcome::Completed(summary) => summary,
        WorkflowOutcome::Declined => panic!("expected completed run"),
    };
    assert_eq!(summary.group, GroupOutcome::Created);
    assert_eq!(summary.policies.applied, 4);
    assert_eq!(summary.invites.succeeded, 2);
    assert_eq!(summary.memberships.succeeded, 2);
    assert_eq!(summary.exit_code(), exit_codes::OK);

    // Stage ordering: group ensure before policies before invites before adds,
    // with the live-state queries last.
    let calls = provider.calls();
    let pos = |prefix: &str| {
        calls
            .iter()
            .position(|c| c.starts_with(prefix))
            .unwrap_or_else(|| panic!("no call with prefix {prefix}"))
    };
    assert!(pos("create_group") < pos("policy"));
    assert!(pos("policy") < pos("invite"));
    assert!(pos("invite") < pos("add"));
    assert!(pos("add") < pos("describe"));
    // Comment and blank roster lines never reach the provider.
    assert_eq!(calls.iter().filter(|c| c.starts_with("invite")).count(), 2);
    // Pacing after every item in both per-item stages.
    assert_eq!(pacer.pauses, 4);
}

#[test]
fn declined_confirmation_issues_no_mutating_calls() {
    let (_temp, roster) = write_roster("alice@x.com\n");
    let provider = ScriptedProvider::new();
    let mut confirm = ScriptedConfirm::new(false);
    let mut pacer = CountingPacer::default();

    let outcome = run_workflow(
        &provider,
        &mut confirm,
        &mut pacer,
        &roster,
        &fast_config(),
        false,
    )
    .expect("workflow");

    assert_eq!(outcome, WorkflowOutcome::Declined);
    assert_eq!(confirm.asked, 1);
    assert!(provider.mutating_calls().is_empty());
}

#[test]
fn assume_yes_skips_the_gate() {
    let (_temp, roster) = write_roster("alice@x.com\n");
    let provider = ScriptedProvider::new();
    let mut confirm = ScriptedConfirm::new(false);
    let mut pacer = CountingPacer::default();

    let outcome = run_workflow(
        &provider,
        &mut confirm,
        &mut pacer,
        &roster,
        &fast_config(),
        true,
    )
    .expect("workflow");

    assert_eq!(confirm.asked, 0);
    assert!(matches!(outcome, WorkflowOutcome::Completed(_)));
}

#[test]
fn existing_group_is_reused_and_run_proceeds() {
    let (_temp, roster) = write_roster("alice@x.com\n");
    let provider = ScriptedProvider::new().with_groups(["account-admins"]);
    let mut confirm = ScriptedConfirm::new(true);
    let mut pacer = CountingPacer::default();

    let outcome = run_workflow(
        &provider,
        &mut confirm,
        &mut pacer,
        &roster,
        &fast_config(),
        false,
    )
    .expect("workflow");

    let summary = match outcome {
        WorkflowOutcome::Completed(summary) => summary,
        WorkflowOutcome::Declined => panic!("expected completed run"),
    };
    assert_eq!(summary.group, GroupOutcome::AlreadyExists);
    assert!(provider.calls().iter().any(|c| c.starts_with("policy")));
    assert!(
        !provider
            .calls()
            .iter()
            .any(|c| c.starts_with("create_group"))
    );
}

#[test]
fn group_creation_failure_aborts_before_policies() {
    let (_temp, roster) = write_roster("alice@x.com\n");
    let provider =
        ScriptedProvider::new().with_create_group_outcome(CallOutcome::rejected("quota"));
    let mut confirm = ScriptedConfirm::new(true);
    let mut pacer = CountingPacer::default();

    let err = run_workflow(
        &provider,
        &mut confirm,
        &mut pacer,
        &roster,
        &fast_config(),
        false,
    )
    .unwrap_err();

    assert!(err.downcast_ref::<GroupCreationError>().is_some());
    assert!(!provider.calls().iter().any(|c| c.starts_with("policy")));
    assert!(!provider.calls().iter().any(|c| c.starts_with("invite")));
}

#[test]
fn invite_failure_still_reaches_membership_stage() {
    let (_temp, roster) = write_roster("alice@x.com\nbob@x.com\n");
    let provider = ScriptedProvider::new()
        .with_invite_outcome("alice@x.com", CallOutcome::rejected("mail bounced"));
    let mut confirm = ScriptedConfirm::new(true);
    let mut pacer = CountingPacer::default();

    let outcome = run_workflow(
        &provider,
        &mut confirm,
        &mut pacer,
        &roster,
        &fast_config(),
        false,
    )
    .expect("workflow");

    let summary = match outcome {
        WorkflowOutcome::Completed(summary) => summary,
        WorkflowOutcome::Declined => panic!("expected completed run"),
    };
    assert_eq!(summary.invites.failed_emails, vec!["alice@x.com"]);
    // The failed invite does not remove alice from the membership pass.
    assert!(provider.calls().iter().any(|c| c == "add:alice@x.com"));
    assert_eq!(summary.memberships.attempted, 2);
    assert_eq!(summary.exit_code(), exit_codes::OK);
}

#[test]
fn membership_failures_downgrade_exit_code() {
    let (_temp, roster) = write_roster("alice@x.com\nbob@x.com\n");
    let provider =
        ScriptedProvider::new().with_add_outcome("bob@x.com", CallOutcome::rejected("not found"));
    let mut confirm = ScriptedConfirm::new(true);
    let mut pacer = CountingPacer::default();

    let outcome = run_workflow(
        &provider,
        &mut confirm,
        &mut pacer,
        &roster,
        &fast_config(),
        false,
    )
    .expect("workflow");

    let summary = match outcome {
        WorkflowOutcome::Completed(summary) => summary,
        WorkflowOutcome::Declined => panic!("expected completed run"),
    };
    assert_eq!(summary.memberships.failed, 1);
    assert_eq!(
        summary.memberships.succeeded + summary.memberships.failed,
        2
    );
    assert_eq!(summary.exit_code(), exit_codes::PARTIAL);
}

#[test]
fn rerun_against_converged_state_stays_clean() {
    let (_temp, roster) = write_roster("alice@x.com\n");
    // Second run: group exists, policies and memberships already in place.
    let provider = ScriptedProvider::new()
        .with_groups(["account-admins"])
        .with_policy_outcomes([
            CallOutcome::AlreadyExists,
            CallOutcome::AlreadyExists,
            CallOutcome::AlreadyExists,
            CallOutcome::AlreadyExists,
        ])
        .with_invite_outcome("alice@x.com", CallOutcome::AlreadyExists)
        .with_add_outcome("alice@x.com", CallOutcome::AlreadyExists);
    let mut confirm = ScriptedConfirm::new(true);
    let mut pacer = CountingPacer::default();

    let outcome = run_workflow(
        &provider,
        &mut confirm,
        &mut pacer,
        &roster,
        &fast_config(),
        false,
    )
    .expect("workflow");

    let summary = match outcome {
        WorkflowOutcome::Completed(summary) => summary,
        WorkflowOutcome::Declined => panic!("expected completed run"),
    };
    assert_eq!(summary.group, GroupOutcome::AlreadyExists);
    assert_eq!(summary.policies.already_present, 4);
    assert_eq!(summary.memberships.failed, 0);
    assert_eq!(summary.exit_code(), exit_codes::OK);
}

#[test]
fn missing_roster_fails_prerequisites() {
    let temp = tempfile::tempdir().expect("tempdir");
    let provider = ScriptedProvider::new();
    let mut confirm = ScriptedConfirm::new(true);
    let mut pacer = CountingPacer::default();

    let err = run_workflow(
        &provider,
        &mut confirm,
        &mut pacer,
        &temp.path().join("nope.txt"),
        &fast_config(),
        false,
    )
    .unwrap_err();

    assert!(err.downcast_ref::<PrerequisiteError>().is_some());
    assert!(provider.mutating_calls().is_empty());
}
