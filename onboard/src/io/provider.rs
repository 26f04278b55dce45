//! Identity-provider capability interface and its CLI-backed implementation.
//!
//! The [`Provider`] trait is the exact contract the workflow needs from the
//! external IAM system. [`IbmCloudCli`] implements it by shelling out to the
//! `ibmcloud` CLI; tests use a scripted provider that returns predetermined
//! outcomes without spawning processes.

use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::core::classify::classify_failure;
use crate::core::types::{CallOutcome, PolicyScope, PolicySpec};
use crate::io::process::{CommandOutput, run_command_captured};

/// Capability interface over the external identity provider.
///
/// Mutating operations return a classified [`CallOutcome`]; `Err` is reserved
/// for transport-level failures (the CLI binary could not be run at all).
pub trait Provider {
    fn is_authenticated(&self) -> Result<bool>;
    fn list_access_groups(&self) -> Result<Vec<String>>;
    fn create_access_group(&self, name: &str, description: &str) -> Result<CallOutcome>;
    fn create_policy(&self, group: &str, policy: &PolicySpec) -> Result<CallOutcome>;
    fn invite_user(&self, email: &str) -> Result<CallOutcome>;
    fn add_user_to_group(&self, group: &str, email: &str) -> Result<CallOutcome>;
    fn describe_group(&self, group: &str) -> Result<String>;
    fn list_group_members(&self, group: &str) -> Result<Vec<String>>;
    fn list_group_policies(&self, group: &str) -> Result<Vec<String>>;
}

/// Provider backed by the `ibmcloud` CLI.
pub struct IbmCloudCli {
    binary: String,
    call_timeout: Option<Duration>,
    output_limit_bytes: usize,
}

impl IbmCloudCli {
    pub fn new(call_timeout: Option<Duration>, output_limit_bytes: usize) -> Self {
        Self {
            binary: "ibmcloud".to_string(),
            call_timeout,
            output_limit_bytes,
        }
    }

    fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(args);
        debug!(?args, "invoking provider cli");
        run_command_captured(cmd, self.call_timeout, self.output_limit_bytes)
            .with_context(|| format!("run {} {}", self.binary, args.join(" ")))
    }

    /// Run a mutating call and classify its outcome.
    fn run_classified(&self, args: &[&str]) -> Result<CallOutcome> {
        let output = self.run(args)?;
        if output.success() {
            return Ok(CallOutcome::Applied);
        }
        if output.timed_out {
            return Ok(CallOutcome::rejected("provider call timed out"));
        }
        Ok(classify_failure(&output.combined_text()))
    }

    /// Run a query and return its stdout, erroring on non-zero exit.
    fn run_query(&self, args: &[&str]) -> Result<String> {
        let output = self.run(args)?;
        if !output.success() {
            return Err(anyhow!(
                "{} {} failed: {}",
                self.binary,
                args.join(" "),
                output.combined_text()
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[derive(Debug, Deserialize)]
struct GroupEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct MemberEntry {
    #[serde(default)]
    email: String,
    #[serde(default)]
    iam_id: String,
}

impl Provider for IbmCloudCli {
    /// `Err` here means the CLI itself was unreachable; `Ok(false)` means it
    /// ran but the operator is not logged in.
    #[instrument(skip(self))]
    fn is_authenticated(&self) -> Result<bool> {
        let output = self.run(&["account", "show"])?;
        Ok(output.success())
    }

    fn list_access_groups(&self) -> Result<Vec<String>> {
        let raw = self.run_query(&["iam", "access-groups", "--output", "json"])?;
        let entries: Vec<GroupEntry> =
            serde_json::from_str(&raw).context("parse access group listing")?;
        Ok(entries.into_iter().map(|e| e.name).collect())
    }

    #[instrument(skip(self, description))]
    fn create_access_group(&self, name: &str, description: &str) -> Result<CallOutcome> {
        self.run_classified(&["iam", "access-group-create", name, "-d", description])
    }

    #[instrument(skip(self, policy), fields(policy = %policy))]
    fn create_policy(&self, group: &str, policy: &PolicySpec) -> Result<CallOutcome> {
        let roles = policy.roles_arg();
        let mut args = vec![
            "iam",
            "access-group-policy-create",
            group,
            "--roles",
            roles.as_str(),
        ];
        match &policy.scope {
            PolicyScope::AccountWide => args.push("--account-management"),
            PolicyScope::Service(name) => {
                args.push("--service-name");
                args.push(name.as_str());
            }
        }
        self.run_classified(&args)
    }

    #[instrument(skip(self))]
    fn invite_user(&self, email: &str) -> Result<CallOutcome> {
        self.run_classified(&["account", "user-invite", email])
    }

    #[instrument(skip(self))]
    fn add_user_to_group(&self, group: &str, email: &str) -> Result<CallOutcome> {
        self.run_classified(&["iam", "access-group-user-add", group, email])
    }

    fn describe_group(&self, group: &str) -> Result<String> {
        self.run_query(&["iam", "access-group", group])
    }

    fn list_group_members(&self, group: &str) -> Result<Vec<String>> {
        let raw = self.run_query(&["iam", "access-group-users", group, "--output", "json"])?;
        let entries: Vec<MemberEntry> =
            serde_json::from_str(&raw).context("parse group member listing")?;
        Ok(entries
            .into_iter()
            .map(|e| if e.email.is_empty() { e.iam_id } else { e.email })
            .collect())
    }

    fn list_group_policies(&self, group: &str) -> Result<Vec<String>> {
        let raw = self.run_query(&["iam", "access-group-policies", group, "--output", "json"])?;
        let entries: Vec<Value> =
            serde_json::from_str(&raw).context("parse group policy listing")?;
        Ok(entries.iter().map(summarize_policy).collect())
    }
}

/// Render one policy listing entry as a `roles @ scope` line.
///
/// The listing schema varies across CLI versions, so extraction is tolerant:
/// missing fields degrade to placeholders rather than erroring the summary.
fn summarize_policy(entry: &Value) -> String {
    let roles = entry["roles"]
        .as_array()
        .map(|roles| {
            roles
                .iter()
                .filter_map(|r| {
                    r["display_name"]
                        .as_str()
                        .or_else(|| r["role_id"].as_str())
                })
                .collect::<Vec<_>>()
                .join(",")
        })
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown roles".to_string());

    let scope = entry["resources"]
        .as_array()
        .and_then(|resources| resources.first())
        .and_then(|r| r["attributes"].as_array())
        .and_then(|attrs| {
            attrs.iter().find_map(|a| {
                if a["name"].as_str() == Some("serviceName") {
                    a["value"].as_str()
                } else {
                    None
                }
            })
        })
        .unwrap_or("account management");

    format!("{roles} @ {scope}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summarize_policy_reads_roles_and_service() {
        let entry = json!({
            "roles": [{"display_name": "Administrator"}, {"display_name": "Manager"}],
            "resources": [{"attributes": [
                {"name": "accountId", "value": "abc"},
                {"name": "serviceName", "value": "iam-identity"}
            ]}]
        });
        assert_eq!(
            summarize_policy(&entry),
            "Administrator,Manager @ iam-identity"
        );
    }

    #[test]
    fn summarize_policy_defaults_to_account_management_scope() {
        let entry = json!({
            "roles": [{"display_name": "Administrator"}],
            "resources": [{"attributes": [{"name": "accountId", "value": "abc"}]}]
        });
        assert_eq!(summarize_policy(&entry), "Administrator @ account management");
    }

    #[test]
    fn summarize_policy_tolerates_missing_fields() {
        assert_eq!(
            summarize_policy(&json!({})),
            "unknown roles @ account management"
        );
    }
}
