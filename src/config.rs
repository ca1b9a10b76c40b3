use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::colors::ColorChoice;
use crate::cli::output::OutputFormat;
use crate::error::{Result, ValidatorError};
use crate::lint::rules::EXTENDED_RULES;
use crate::lint::{ConceptOrder, Severity, ValidationConfig};

/// Name of the config file picked up from the working directory.
pub const PROJECT_CONFIG: &str = "edam-validator.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Defaults, then the config file, then `EDAM_VALIDATOR_*` variables.
    ///
    /// The file is `explicit_path`, else `$EDAM_VALIDATOR_CONFIG`, else
    /// `edam-validator.toml` in the working directory when it exists.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::load_with(explicit_path, &cwd, |key| std::env::var(key).ok())
    }

    /// [`Config::load`] with the working directory and environment supplied.
    pub fn load_with<F>(explicit_path: Option<&Path>, cwd: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| lookup("EDAM_VALIDATOR_CONFIG").map(PathBuf::from));

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ValidatorError::Config(format!(
                    "config file {} not found",
                    path.display()
                )));
            }
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else if let Some(project) = Self::load_patch(&cwd.join(PROJECT_CONFIG))? {
            config.merge_patch(project);
        }

        config.apply_env_overrides(lookup)?;

        Ok(config)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path).map_err(|err| {
            ValidatorError::Config(format!("read config {}: {err}", path.display()))
        })?;
        let patch = toml::from_str(&raw).map_err(|err| {
            ValidatorError::Config(format!("parse config {}: {err}", path.display()))
        })?;
        debug!(path = %path.display(), "loaded config file");
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.rules {
            self.rules.merge(patch);
        }
        if let Some(patch) = patch.output {
            self.output.merge(patch);
        }
    }

    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = env_bool(&lookup, "EDAM_VALIDATOR_STRICT") {
            self.rules.strict = value;
        }
        if let Some(values) = env_list(&lookup, "EDAM_VALIDATOR_SKIP") {
            self.rules.skip = merge_unique(values, &self.rules.skip);
        }
        if let Some(value) = env_usize(&lookup, "EDAM_VALIDATOR_MAX_ERRORS")? {
            self.rules.max_errors = Some(value);
        }
        if let Some(value) = lookup("EDAM_VALIDATOR_ORDER") {
            self.rules.order = parse_order(&value)?;
        }
        if let Some(value) = env_bool(&lookup, "EDAM_VALIDATOR_PARALLEL") {
            self.rules.parallel = value;
        }
        Ok(())
    }

    /// The engine configuration these settings describe.
    #[must_use]
    pub fn validation_config(&self) -> ValidationConfig {
        let mut config = ValidationConfig::new().with_order(self.rules.order);
        config.strict = self.rules.strict;
        config.max_errors = self.rules.max_errors;
        config.parallel = self.rules.parallel;
        config.disabled_rules = self.rules.skip.iter().cloned().collect();
        if self.rules.legacy {
            config
                .disabled_rules
                .extend(EXTENDED_RULES.iter().map(ToString::to_string));
        }
        config.severity_overrides = self
            .rules
            .severity
            .iter()
            .map(|(id, severity)| (id.clone(), *severity))
            .collect();
        config
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Rule ids never run
    #[serde(default)]
    pub skip: Vec<String>,
    /// When non-empty, only these rules (and their dependencies) run
    #[serde(default)]
    pub only: Vec<String>,
    #[serde(default)]
    pub severity: BTreeMap<String, Severity>,
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub max_errors: Option<usize>,
    #[serde(default)]
    pub order: ConceptOrder,
    #[serde(default)]
    pub parallel: bool,
    /// Report only what the legacy checker reported
    #[serde(default)]
    pub legacy: bool,
}

impl RulesConfig {
    fn merge(&mut self, patch: RulesPatch) {
        if let Some(values) = patch.skip {
            self.skip = merge_unique(values, &self.skip);
        }
        if let Some(values) = patch.only {
            self.only = values;
        }
        if let Some(values) = patch.severity {
            self.severity.extend(values);
        }
        if let Some(value) = patch.strict {
            self.strict = value;
        }
        if let Some(value) = patch.max_errors {
            self.max_errors = Some(value);
        }
        if let Some(value) = patch.order {
            self.order = value;
        }
        if let Some(value) = patch.parallel {
            self.parallel = value;
        }
        if let Some(value) = patch.legacy {
            self.legacy = value;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub color: ColorChoice,
    #[serde(default)]
    pub summary: bool,
}

impl OutputConfig {
    fn merge(&mut self, patch: OutputPatch) {
        if let Some(value) = patch.format {
            self.format = value;
        }
        if let Some(value) = patch.color {
            self.color = value;
        }
        if let Some(value) = patch.summary {
            self.summary = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigPatch {
    pub rules: Option<RulesPatch>,
    pub output: Option<OutputPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RulesPatch {
    pub skip: Option<Vec<String>>,
    pub only: Option<Vec<String>>,
    pub severity: Option<BTreeMap<String, Severity>>,
    pub strict: Option<bool>,
    pub max_errors: Option<usize>,
    pub order: Option<ConceptOrder>,
    pub parallel: Option<bool>,
    pub legacy: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputPatch {
    pub format: Option<OutputFormat>,
    pub color: Option<ColorChoice>,
    pub summary: Option<bool>,
}

/// Parse an `order` value: `document` or `identity`.
pub fn parse_order(value: &str) -> Result<ConceptOrder> {
    match value.trim().to_lowercase().as_str() {
        "document" => Ok(ConceptOrder::Document),
        "identity" => Ok(ConceptOrder::Identity),
        _ => Err(ValidatorError::Config(format!(
            "invalid order {value} (expected document|identity)"
        ))),
    }
}

fn merge_unique(values: Vec<String>, existing: &[String]) -> Vec<String> {
    let mut out = existing.to_vec();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

fn env_bool<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Option<bool> {
    lookup(key).map(|value| {
        matches!(
            value.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_usize<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Result<Option<usize>> {
    match lookup(key) {
        Some(value) => value.trim().parse::<usize>().map(Some).map_err(|err| {
            ValidatorError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        None => Ok(None),
    }
}

fn env_list<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Option<Vec<String>> {
    lookup(key).map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(ToString::to_string)
            .collect()
    })
}
