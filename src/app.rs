use crate::cli::Cli;
use crate::cli::colors::ColorSupport;
use crate::cli::output::OutputFormat;
use crate::config::Config;
use crate::error::Result;
use crate::lint::{ValidationEngine, all_rules, select};

pub struct AppContext {
    pub config: Config,
    pub output_format: OutputFormat,
    pub color: ColorSupport,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = Config::load(cli.config.as_deref())?;
        apply_cli(&mut config, cli);

        let color = ColorSupport::for_choice(config.output.color);
        color.apply_global();

        Ok(Self {
            output_format: config.output.format,
            color,
            config,
        })
    }

    /// An engine carrying the configured rule set.
    pub fn engine(&self) -> Result<ValidationEngine> {
        let rules = if self.config.rules.only.is_empty() {
            all_rules()
        } else {
            select(&self.config.rules.only)?
        };
        let mut engine = ValidationEngine::new(self.config.validation_config());
        for rule in rules {
            engine.register(rule);
        }
        Ok(engine)
    }
}

/// Command-line flags win over the config file and environment.
fn apply_cli(config: &mut Config, cli: &Cli) {
    let rules = &mut config.rules;
    rules.strict |= cli.strict;
    rules.parallel |= cli.parallel;
    rules.legacy |= cli.legacy;
    if let Some(max) = cli.max_errors {
        rules.max_errors = Some(max);
    }
    if let Some(order) = cli.order {
        rules.order = order;
    }
    for id in &cli.skip {
        if !rules.skip.contains(id) {
            rules.skip.push(id.clone());
        }
    }
    if !cli.rules.is_empty() {
        rules.only.clone_from(&cli.rules);
    }

    let output = &mut config.output;
    if let Some(format) = cli.output_format() {
        output.format = format;
    }
    if let Some(color) = cli.color {
        output.color = color;
    }
    output.summary |= cli.summary;
}
