//! Bulk user provisioning into a cloud IAM access group.
//!
//! Given a roster file of email addresses, the workflow ensures the target
//! access group exists with a fixed set of administrator policies, invites
//! each user to the account, adds each user to the group, and reports the
//! resulting live group state. Every stage is idempotent, so re-running the
//! whole workflow is the prescribed recovery path after partial failure.
//!
//! The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (roster rules, policy set,
//!   failure classification, report aggregation). No I/O, fully testable in
//!   isolation.
//! - **[`io`]**: Side-effecting operations (provider CLI, terminal, files).
//!   Behind trait seams to enable scripted fakes in tests.
//!
//! Stage modules ([`prereqs`], [`group`], [`policies`], [`invite`],
//! [`membership`]) coordinate core logic with I/O; [`workflow`] sequences
//! them into the full run.

pub mod core;
pub mod exit_codes;
pub mod group;
pub mod invite;
pub mod io;
pub mod logging;
pub mod membership;
pub mod policies;
pub mod prereqs;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod workflow;
