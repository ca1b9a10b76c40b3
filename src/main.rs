//! edam-validator - EDAM ontology consistency checker
//!
//! Reads one EDAM OWL/XML document, runs the consistency rules and exits
//! non-zero when any error-severity finding is reported.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use edam_validator::app::AppContext;
use edam_validator::cli::Cli;
use edam_validator::cli::output::OutputFormat;
use edam_validator::{Result, ValidatorError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        // The findings on stdout already say why.
        Err(ValidatorError::ValidationFailed(_)) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let ctx = AppContext::from_cli(cli)?;
    edam_validator::cli::commands::run(&ctx, cli)
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,edam_validator=warn",
        1 => "info,edam_validator=debug",
        2 => "debug,edam_validator=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.output_format() == Some(OutputFormat::Json) {
        // JSON logging alongside the JSON report
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
