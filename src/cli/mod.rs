//! Command-line interface.

pub mod completions;
pub mod output;
pub mod prompt;
pub mod status;
pub mod wiring;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::command::Command;
use crate::core::config::{FileConfig, Overrides, Settings};
use crate::core::engine::{Engine, Outcome};
use crate::error::Result;

/// Citadel - provisioning operator for a secrets-management cluster.
#[derive(Parser)]
#[command(
    name = "citadel",
    about = "Provisioning operator for a secrets-management cluster",
    version,
    after_help = "Exit status: 0 completed, 2 skipped (precondition not met), 1 failed."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,

    /// Environment name
    #[arg(short, long, env = "CITADEL_ENVIRONMENT", global = true)]
    pub environment: Option<String>,

    /// Cloud region (falls back to AWS_REGION)
    #[arg(long, env = "CITADEL_REGION", global = true)]
    pub region: Option<String>,

    /// Config store bucket of the environment
    #[arg(long, env = "CITADEL_BUCKET", global = true)]
    pub bucket: Option<String>,

    /// Config store backend: s3 or fs
    #[arg(long, env = "CITADEL_STORE", global = true)]
    pub store: Option<String>,

    /// Root directory of the fs store
    #[arg(long, env = "CITADEL_STORE_PATH", global = true)]
    pub store_path: Option<PathBuf>,

    /// Path to citadel.toml
    #[arg(long, env = "CITADEL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum CliCommand {
    #[command(flatten)]
    Operation(Command),

    /// Show what the config store holds for the environment
    Status,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            environment: self.environment.clone(),
            region: self
                .region
                .clone()
                .or_else(|| std::env::var("AWS_REGION").ok()),
            bucket: self.bucket.clone(),
            store: self.store.clone(),
            store_path: self.store_path.clone(),
        }
    }

    fn settings(&self) -> Result<Settings> {
        let file = FileConfig::load(self.config.as_deref())?;
        Settings::resolve(file, self.overrides())
    }
}

/// Execute a parsed command line.
///
/// Returns the outcome of a provisioning command, `None` for the others.
pub fn execute(cli: Cli) -> Result<Option<Outcome>> {
    match &cli.command {
        CliCommand::Completions { shell } => {
            completions::write(*shell, &mut std::io::stdout())?;
            Ok(None)
        }
        CliCommand::Status => {
            let settings = cli.settings()?;
            let services = wiring::services(&settings, false)?;
            status::execute(&settings, &services)?;
            Ok(None)
        }
        CliCommand::Operation(command) => {
            let settings = cli.settings()?;
            let compatibility_mode = match command {
                Command::GenerateCertificateFiles(args) => args.enable_le_certfix,
                _ => false,
            };
            let engine = Engine::new(wiring::services(&settings, compatibility_mode)?);

            let outcome = engine.execute(command)?;
            report(&outcome);
            Ok(Some(outcome))
        }
    }
}

fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Completed { operation } => output::success(&format!("{} completed", operation)),
        Outcome::Skipped { operation, reasons } => {
            output::warn(&format!("{} skipped: precondition failed", operation));
            for reason in reasons {
                output::hint(reason);
            }
        }
    }
}
