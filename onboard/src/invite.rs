//! Stage: invite each roster email to the account.
//!
//! Strictly sequential, single pass, paced between items. Invite failures
//! (including "already a member of the account") are warnings only; the
//! email still proceeds to the membership stage regardless.

use tracing::warn;

use crate::core::report::StageReport;
use crate::core::types::CallOutcome;
use crate::io::console;
use crate::io::pacer::Pacer;
use crate::io::provider::Provider;
use crate::io::roster::Roster;

/// Invite every roster entry, pausing after each item.
pub fn invite_all<P: Provider>(provider: &P, pacer: &mut dyn Pacer, roster: &Roster) -> StageReport {
    let mut report = StageReport::default();

    for email in roster.iter() {
        match provider.invite_user(email) {
            Ok(CallOutcome::Applied) => {
                report.record_success();
                console::success(format!("invited {email}"));
            }
            Ok(CallOutcome::AlreadyExists) => {
                report.record_failure(email);
                console::warn(format!("{email} is already a member of the account"));
            }
            Ok(CallOutcome::Rejected { message }) => {
                report.record_failure(email);
                warn!(email, message, "invite rejected");
                console::warn(format!("could not invite {email}: {message}"));
            }
            Err(err) => {
                report.record_failure(email);
                warn!(email, err = %err, "invite call failed");
                console::warn(format!("could not invite {email}: {err:#}"));
            }
        }
        pacer.pause();
    }

    report
}
