//! Stage: attach the administrator policies to the access group.
//!
//! Best-effort and cumulative: each of the four policies is attempted
//! independently, duplicates and rejections are warnings, and there is no
//! rollback. The group may end the stage with any subset attached.

use tracing::warn;

use crate::core::policy::admin_policies;
use crate::core::report::PolicyReport;
use crate::core::types::CallOutcome;
use crate::io::console;
use crate::io::provider::Provider;

/// Attempt all four administrator policies against `group`.
///
/// Never fails the run: transport errors are folded into the rejected count.
pub fn assign_admin_policies<P: Provider>(provider: &P, group: &str) -> PolicyReport {
    let mut report = PolicyReport::default();

    for policy in admin_policies() {
        match provider.create_policy(group, &policy) {
            Ok(CallOutcome::Applied) => {
                report.applied += 1;
                console::success(format!("attached policy {policy}"));
            }
            Ok(CallOutcome::AlreadyExists) => {
                report.already_present += 1;
                console::warn(format!("policy {policy} already attached"));
            }
            Ok(CallOutcome::Rejected { message }) => {
                report.rejected += 1;
                warn!(policy = %policy, message, "policy rejected");
                console::warn(format!("could not attach policy {policy}: {message}"));
            }
            Err(err) => {
                report.rejected += 1;
                warn!(policy = %policy, err = %err, "policy call failed");
                console::warn(format!("could not attach policy {policy}: {err:#}"));
            }
        }
    }

    report
}
