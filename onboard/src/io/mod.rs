//! Side-effecting adapters: process spawning, provider CLI, terminal, files.

pub mod config;
pub mod confirm;
pub mod console;
pub mod pacer;
pub mod process;
pub mod provider;
pub mod roster;
