//! Citadel - provisioning operator for a secrets-management cluster.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use citadel::cli::output;
use citadel::cli::{execute, Cli};
use citadel::error::{AuthorityError, CertificateError, ConfigError, Error, PreconditionError};
use citadel::Outcome;

const EXIT_FAILED: i32 = 1;
const EXIT_SKIPPED: i32 = 2;

fn main() {
    // Usage errors exit 1 so that 2 always means "skipped".
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { EXIT_FAILED } else { 0 });
        }
    };

    let filter = EnvFilter::try_from_env("CITADEL_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("citadel=debug")
        } else {
            EnvFilter::new("citadel=info")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    match execute(cli) {
        Ok(Some(Outcome::Skipped { .. })) => std::process::exit(EXIT_SKIPPED),
        Ok(_) => {}
        Err(e) => {
            output::error(&e.to_string());
            if let Some(hint) = suggestion(&e) {
                output::hint(hint);
            }
            std::process::exit(EXIT_FAILED);
        }
    }
}

fn suggestion(error: &Error) -> Option<&'static str> {
    match error {
        Error::Config(ConfigError::MissingField { field }) => match *field {
            "environment.name" => Some("pass --environment or set [environment] name in citadel.toml"),
            "environment.region" => Some("pass --region or set [environment] region in citadel.toml"),
            "environment.bucket" => Some("pass --bucket, or use --store fs for a local store"),
            _ => None,
        },
        Error::Certificate(CertificateError::GenerationFailed(AuthorityError::ClientNotFound(_))) => {
            Some("install lego (https://go-acme.github.io/lego/) or set [acme] binary")
        }
        Error::Certificate(CertificateError::DirectoryNotWritable { .. }) => {
            Some("pass a writable directory with --cert-dir")
        }
        Error::Precondition(PreconditionError::MissingFile(_)) => {
            Some("check the path passed on the command line")
        }
        _ => None,
    }
}
