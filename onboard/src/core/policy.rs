//! Fixed provisioning targets: the access group and its administrator policies.
//!
//! These are workflow constants, not configuration. Changing the target group
//! or the policy set means changing the workflow itself.

use crate::core::types::{PolicyScope, PolicySpec, Role};

/// Name of the access group the workflow provisions into.
pub const ACCESS_GROUP_NAME: &str = "account-admins";

/// Description stamped on the group when it is created.
pub const ACCESS_GROUP_DESCRIPTION: &str = "Administrators provisioned by onboard";

/// The four administrator policies attached to the group, in attempt order.
pub fn admin_policies() -> Vec<PolicySpec> {
    vec![
        PolicySpec::new(vec![Role::Administrator], PolicyScope::AccountWide),
        PolicySpec::new(
            vec![Role::Administrator],
            PolicyScope::Service("*".to_string()),
        ),
        PolicySpec::new(
            vec![Role::Administrator, Role::Manager],
            PolicyScope::Service("iam-identity".to_string()),
        ),
        PolicySpec::new(
            vec![Role::Administrator],
            PolicyScope::Service("resource-controller".to_string()),
        ),
    ]
}
