//! Interactive confirmation gate.
//!
//! The workflow asks once, before any mutating call. Anything other than an
//! affirmative answer aborts the run as a deliberate no-op.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

/// Yes/no gate asked before the workflow mutates provider state.
pub trait ConfirmGate {
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Gate backed by the controlling terminal (stdin/stdout).
pub struct TerminalConfirm;

impl ConfirmGate for TerminalConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        print!("{prompt} [y/N] ");
        io::stdout().flush().context("flush prompt")?;

        let mut answer = String::new();
        io::stdin()
            .lock()
            .read_line(&mut answer)
            .context("read confirmation answer")?;
        Ok(is_affirmative(&answer))
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
