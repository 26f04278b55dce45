//! CLI entry point for the provisioning workflow.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use onboard::core::policy::ACCESS_GROUP_NAME;
use onboard::exit_codes;
use onboard::io::config::{OnboardConfig, load_config, write_config};
use onboard::io::confirm::TerminalConfirm;
use onboard::io::console;
use onboard::io::pacer::pacer_from_config;
use onboard::io::provider::IbmCloudCli;
use onboard::prereqs::check_prereqs;
use onboard::logging;
use onboard::workflow::{WorkflowOutcome, print_live_state, run_workflow};

#[derive(Parser)]
#[command(
    name = "onboard",
    version,
    about = "Bulk-provision users into a cloud IAM access group"
)]
struct Cli {
    /// Path to onboard.toml (pacing and delay tuning).
    #[arg(long, default_value = "onboard.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default config file if missing.
    Init {
        /// Overwrite an existing config file.
        #[arg(short, long)]
        force: bool,
    },
    /// Run the full provisioning workflow.
    Run {
        /// Roster file: one email per line, `#` comments and blanks ignored.
        #[arg(long, default_value = "users.txt")]
        roster: PathBuf,
        /// Skip the interactive confirmation gate.
        #[arg(short, long)]
        yes: bool,
    },
    /// Check prerequisites only; no provider state is changed.
    Check {
        #[arg(long, default_value = "users.txt")]
        roster: PathBuf,
    },
    /// Print the live state of the target access group.
    Report,
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            console::error(format!("{err:#}"));
            console::error("provisioning did not complete; nothing to roll back, re-run to retry");
            ExitCode::from(exit_codes::FATAL as u8)
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Init { force } => cmd_init(&cli.config, force),
        Command::Run { roster, yes } => {
            let cfg = load_config(&cli.config)?;
            let provider = cli_provider(&cfg);
            let mut confirm = TerminalConfirm;
            let mut pacer = pacer_from_config(&cfg);
            let outcome = run_workflow(
                &provider,
                &mut confirm,
                pacer.as_mut(),
                &roster,
                &cfg,
                yes,
            )?;
            match outcome {
                WorkflowOutcome::Declined => Ok(exit_codes::OK),
                WorkflowOutcome::Completed(summary) => Ok(summary.exit_code()),
            }
        }
        Command::Check { roster } => {
            let cfg = load_config(&cli.config)?;
            check_prereqs(&cli_provider(&cfg), &roster)?;
            console::success("all prerequisites met");
            Ok(exit_codes::OK)
        }
        Command::Report => {
            let cfg = load_config(&cli.config)?;
            print_live_state(&cli_provider(&cfg), ACCESS_GROUP_NAME);
            Ok(exit_codes::OK)
        }
    }
}

fn cli_provider(cfg: &OnboardConfig) -> IbmCloudCli {
    IbmCloudCli::new(
        cfg.call_timeout_secs.map(Duration::from_secs),
        cfg.output_limit_bytes,
    )
}

fn cmd_init(path: &Path, force: bool) -> Result<i32> {
    if path.exists() && !force {
        console::warn(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
        return Ok(exit_codes::OK);
    }
    write_config(path, &OnboardConfig::default())?;
    console::success(format!("wrote {}", path.display()));
    Ok(exit_codes::OK)
}
