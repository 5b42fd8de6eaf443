//! hazyctl - cloud key vault helper.

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hazyctl::cli::output;
use hazyctl::cli::{execute, Cli};
use hazyctl::core::constants::{LOG_ENV, LOG_FORMAT_ENV};
use hazyctl::error::{CredentialError, Error};

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("hazyctl=debug")
        } else {
            EnvFilter::new("hazyctl=warn")
        }
    });

    let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Parse arguments; usage errors are fatal errors like any other.
fn parse() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            std::process::exit(0);
        }
        Err(e) => {
            let msg = e.to_string();
            output::error(msg.trim_start_matches("error: ").trim_end());
            std::process::exit(1);
        }
    }
}

fn main() {
    let cli = parse();
    init_tracing(cli.verbose);

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::Credential(CredentialError::Unavailable(_)) => Some("run: az login"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
