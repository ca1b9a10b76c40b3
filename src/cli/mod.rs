//! Command-line surface.

pub mod colors;
pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use crate::cli::colors::ColorChoice;
use crate::cli::output::OutputFormat;
use crate::lint::ConceptOrder;

#[derive(Parser, Debug)]
#[command(name = "edam-validator")]
#[command(author, version, about = "Check an EDAM OWL document for internal consistency")]
pub struct Cli {
    /// EDAM OWL/XML document to validate
    #[arg(value_name = "FILE", required_unless_present_any = ["list_rules", "explain"])]
    pub path: Option<PathBuf>,

    /// Config file (default: ./edam-validator.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, short = 'f', value_enum)]
    pub format: Option<OutputFormat>,

    /// When to colour findings
    #[arg(long, value_enum)]
    pub color: Option<ColorChoice>,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// Stop after N errors
    #[arg(long, value_name = "N")]
    pub max_errors: Option<usize>,

    /// Skip specific rules (comma-separated IDs)
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    pub skip: Vec<String>,

    /// Only run specific rules and what they depend on (comma-separated IDs)
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    pub rules: Vec<String>,

    /// Concept visiting order
    #[arg(long, value_parser = parse_order_arg)]
    pub order: Option<ConceptOrder>,

    /// Evaluate rules on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Only report what the legacy validator reported
    #[arg(long)]
    pub legacy: bool,

    /// Print a summary after the findings
    #[arg(long)]
    pub summary: bool,

    /// List all available rules
    #[arg(long, conflicts_with = "explain")]
    pub list_rules: bool,

    /// Show detailed rule documentation
    #[arg(long, value_name = "RULE")]
    pub explain: Option<String>,
}

impl Cli {
    /// The output format requested on the command line, if any.
    #[must_use]
    pub const fn output_format(&self) -> Option<OutputFormat> {
        self.format
    }
}

fn parse_order_arg(value: &str) -> Result<ConceptOrder, String> {
    crate::config::parse_order(value).map_err(|err| err.to_string())
}
