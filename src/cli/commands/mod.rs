//! CLI command implementations
//!
//! The binary has no subcommands: `--list-rules` and `--explain` switch to
//! the rule catalogue, anything else validates the given document.

pub mod rules;
pub mod validate;

use crate::app::AppContext;
use crate::cli::Cli;
use crate::error::{Result, ValidatorError};

pub fn run(ctx: &AppContext, cli: &Cli) -> Result<()> {
    if let Some(rule_id) = &cli.explain {
        return rules::explain(ctx, rule_id);
    }
    if cli.list_rules {
        return rules::list(ctx);
    }
    let path = cli
        .path
        .as_deref()
        .ok_or_else(|| ValidatorError::Config("no document given".to_string()))?;
    validate::run(ctx, path)
}
