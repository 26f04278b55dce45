//! Operator-facing console output.
//!
//! Colored, timestamped status lines distinguishing info, success, warning,
//! and error. This is product output, printed unconditionally; `tracing` in
//! `logging` covers dev diagnostics.

use chrono::Local;
use colored::Colorize;

fn stamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

pub fn info(msg: impl AsRef<str>) {
    println!("{} {} {}", stamp().dimmed(), "•".blue(), msg.as_ref());
}

pub fn success(msg: impl AsRef<str>) {
    println!("{} {} {}", stamp().dimmed(), "✓".green(), msg.as_ref());
}

pub fn warn(msg: impl AsRef<str>) {
    println!(
        "{} {} {}",
        stamp().dimmed(),
        "!".yellow(),
        msg.as_ref().yellow()
    );
}

pub fn error(msg: impl AsRef<str>) {
    eprintln!("{} {} {}", stamp().dimmed(), "✗".red(), msg.as_ref().red());
}

/// Section divider between workflow stages.
pub fn heading(title: &str) {
    println!();
    println!("{}", title.bold());
}
