//! Stable exit codes for the onboard CLI.

/// Run completed cleanly, or the operator declined the confirmation gate.
pub const OK: i32 = 0;
/// Fatal error: failed prerequisite, group creation failure, or any other
/// error that aborted the run.
pub const FATAL: i32 = 1;
/// Run completed but one or more membership adds failed.
pub const PARTIAL: i32 = 2;
