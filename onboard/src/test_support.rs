//! Test-only fakes for the provider, confirmation gate, and pacer.
//!
//! `ScriptedProvider` records every call in order and returns predetermined
//! outcomes without spawning processes, so stage and workflow tests are
//! deterministic and offline.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use anyhow::{Result, anyhow};

use crate::core::types::{CallOutcome, PolicySpec};
use crate::io::confirm::ConfirmGate;
use crate::io::pacer::Pacer;
use crate::io::provider::Provider;
use crate::io::roster::Roster;

/// Build a roster from string literals.
pub fn roster_of<const N: usize>(emails: [&str; N]) -> Roster {
    Roster::from_emails(emails.iter().map(|e| e.to_string()).collect())
}

/// Scripted provider fake.
///
/// Defaults: authenticated, no existing groups, every mutating call
/// `Applied`, empty listings. Builder methods override per scenario.
pub struct ScriptedProvider {
    authenticated: bool,
    cli_unreachable: bool,
    groups: Vec<String>,
    create_group_outcome: CallOutcome,
    policy_outcomes: RefCell<VecDeque<CallOutcome>>,
    invite_outcomes: HashMap<String, CallOutcome>,
    add_outcomes: HashMap<String, CallOutcome>,
    description: String,
    members: Vec<String>,
    policies: Vec<String>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            authenticated: true,
            cli_unreachable: false,
            groups: Vec::new(),
            create_group_outcome: CallOutcome::Applied,
            policy_outcomes: RefCell::new(VecDeque::new()),
            invite_outcomes: HashMap::new(),
            add_outcomes: HashMap::new(),
            description: "scripted group".to_string(),
            members: Vec::new(),
            policies: Vec::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn unauthenticated(mut self) -> Self {
        self.authenticated = false;
        self
    }

    pub fn unreachable(mut self) -> Self {
        self.cli_unreachable = true;
        self
    }

    pub fn with_groups<const N: usize>(mut self, names: [&str; N]) -> Self {
        self.groups = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn with_create_group_outcome(mut self, outcome: CallOutcome) -> Self {
        self.create_group_outcome = outcome;
        self
    }

    /// Queue outcomes for `create_policy` calls in order; once the queue is
    /// drained, remaining calls return `Applied`.
    pub fn with_policy_outcomes<const N: usize>(self, outcomes: [CallOutcome; N]) -> Self {
        self.policy_outcomes.borrow_mut().extend(outcomes);
        self
    }

    pub fn with_invite_outcome(mut self, email: &str, outcome: CallOutcome) -> Self {
        self.invite_outcomes.insert(email.to_string(), outcome);
        self
    }

    pub fn with_add_outcome(mut self, email: &str, outcome: CallOutcome) -> Self {
        self.add_outcomes.insert(email.to_string(), outcome);
        self
    }

    pub fn with_members<const N: usize>(mut self, members: [&str; N]) -> Self {
        self.members = members.iter().map(|m| m.to_string()).collect();
        self
    }

    /// Every recorded call, in invocation order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Recorded calls that would mutate provider state.
    pub fn mutating_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| {
                c.starts_with("create_group")
                    || c.starts_with("policy")
                    || c.starts_with("invite")
                    || c.starts_with("add")
            })
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl Default for ScriptedProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for ScriptedProvider {
    fn is_authenticated(&self) -> Result<bool> {
        self.record("is_authenticated".to_string());
        if self.cli_unreachable {
            return Err(anyhow!("no such binary"));
        }
        Ok(self.authenticated)
    }

    fn list_access_groups(&self) -> Result<Vec<String>> {
        self.record("list_groups".to_string());
        Ok(self.groups.clone())
    }

    fn create_access_group(&self, name: &str, _description: &str) -> Result<CallOutcome> {
        self.record(format!("create_group:{name}"));
        Ok(self.create_group_outcome.clone())
    }

    fn create_policy(&self, group: &str, policy: &PolicySpec) -> Result<CallOutcome> {
        self.record(format!("policy:{group}:{policy}"));
        Ok(self
            .policy_outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or(CallOutcome::Applied))
    }

    fn invite_user(&self, email: &str) -> Result<CallOutcome> {
        self.record(format!("invite:{email}"));
        Ok(self
            .invite_outcomes
            .get(email)
            .cloned()
            .unwrap_or(CallOutcome::Applied))
    }

    fn add_user_to_group(&self, _group: &str, email: &str) -> Result<CallOutcome> {
        self.record(format!("add:{email}"));
        Ok(self
            .add_outcomes
            .get(email)
            .cloned()
            .unwrap_or(CallOutcome::Applied))
    }

    fn describe_group(&self, group: &str) -> Result<String> {
        self.record(format!("describe:{group}"));
        Ok(format!("Name: {group}\nDescription: {}", self.description))
    }

    fn list_group_members(&self, group: &str) -> Result<Vec<String>> {
        self.record(format!("list_members:{group}"));
        Ok(self.members.clone())
    }

    fn list_group_policies(&self, group: &str) -> Result<Vec<String>> {
        self.record(format!("list_policies:{group}"));
        Ok(self.policies.clone())
    }
}

/// Confirmation gate returning a scripted answer.
pub struct ScriptedConfirm {
    pub answer: bool,
    pub asked: u32,
}

impl ScriptedConfirm {
    pub fn new(answer: bool) -> Self {
        Self { answer, asked: 0 }
    }
}

impl ConfirmGate for ScriptedConfirm {
    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        self.asked += 1;
        Ok(self.answer)
    }
}

/// Pacer that never sleeps but counts how often it was asked to.
#[derive(Default)]
pub struct CountingPacer {
    pub pauses: u32,
}

impl Pacer for CountingPacer {
    fn pause(&mut self) {
        self.pauses += 1;
    }
}
