//! Pure, deterministic logic shared by the provisioning stages.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data and return deterministic outputs suitable for direct unit tests.

pub mod classify;
pub mod policy;
pub mod report;
pub mod roster;
pub mod types;
