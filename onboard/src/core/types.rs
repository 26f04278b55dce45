//! Shared contract types for the provisioning core.
//!
//! These types are pure data: they carry no I/O state and are the stable
//! interface between the stage modules and the provider adapter.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role understood by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Administrator,
    Manager,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Administrator => f.write_str("Administrator"),
            Role::Manager => f.write_str("Manager"),
        }
    }
}

/// Scope of a policy grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyScope {
    /// Account-management services (the whole account surface).
    AccountWide,
    /// A single service by name. `"*"` means all IAM-enabled services.
    Service(String),
}

impl fmt::Display for PolicyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyScope::AccountWide => f.write_str("account management"),
            PolicyScope::Service(name) if name == "*" => f.write_str("all services"),
            PolicyScope::Service(name) => write!(f, "service {name}"),
        }
    }
}

/// A policy to attach to an access group: one or more roles over a scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySpec {
    pub roles: Vec<Role>,
    pub scope: PolicyScope,
}

impl PolicySpec {
    pub fn new(roles: Vec<Role>, scope: PolicyScope) -> Self {
        Self { roles, scope }
    }

    /// Comma-joined role list as the provider CLI expects it.
    pub fn roles_arg(&self) -> String {
        let names: Vec<String> = self.roles.iter().map(Role::to_string).collect();
        names.join(",")
    }
}

impl fmt::Display for PolicySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.roles_arg(), self.scope)
    }
}

/// Classified outcome of a mutating provider call.
///
/// `AlreadyExists` covers the expected duplicate-class responses (group or
/// policy already present, user already invited or already a member) that
/// the workflow treats as non-fatal. `Rejected` is a genuine failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    Applied,
    AlreadyExists,
    Rejected { message: String },
}

impl CallOutcome {
    pub fn rejected(message: impl Into<String>) -> Self {
        CallOutcome::Rejected {
            message: message.into(),
        }
    }
}

/// Outcome of the group-ensure stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOutcome {
    Created,
    AlreadyExists,
}
