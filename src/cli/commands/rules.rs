//! Rule catalogue: `--list-rules` and `--explain`.

use console::style;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, json_ok};
use crate::error::{Result, ValidatorError};
use crate::lint::{RuleCategory, RuleInfo, ValidationEngine, all_rules};

const CATEGORIES: [(RuleCategory, &str); 4] = [
    (RuleCategory::Identifier, "Identifier"),
    (RuleCategory::Structure, "Structure"),
    (RuleCategory::Reference, "Reference"),
    (RuleCategory::Lifecycle, "Lifecycle"),
];

/// Every built-in rule, flagged as disabled under the current configuration.
fn catalogue(ctx: &AppContext) -> Vec<RuleInfo> {
    let mut engine = ValidationEngine::new(ctx.config.validation_config());
    for rule in all_rules() {
        engine.register(rule);
    }
    engine.list_rules()
}

pub fn list(ctx: &AppContext) -> Result<()> {
    let rules = catalogue(ctx);

    if ctx.output_format == OutputFormat::Json {
        return emit_json(&json_ok(rules));
    }

    let mut layout = HumanLayout::new();
    layout.title("Available Rules");
    for (category, name) in CATEGORIES {
        let in_category: Vec<&RuleInfo> =
            rules.iter().filter(|r| r.category == category).collect();
        if in_category.is_empty() {
            continue;
        }

        layout.section(name);
        for rule in in_category {
            let badge = if rule.disabled {
                format!(" {}", style("[disabled]").dim())
            } else {
                String::new()
            };
            layout.bullet(&format!(
                "{} - {} ({}){badge}",
                rule.id, rule.name, rule.default_severity
            ));
        }
        layout.blank();
    }
    emit_human(layout);
    Ok(())
}

pub fn explain(ctx: &AppContext, rule_id: &str) -> Result<()> {
    let rule = catalogue(ctx)
        .into_iter()
        .find(|r| r.id == rule_id)
        .ok_or_else(|| ValidatorError::NotFound(format!("rule '{rule_id}'")))?;

    if ctx.output_format == OutputFormat::Json {
        return emit_json(&json_ok(rule));
    }

    let mut layout = HumanLayout::new();
    layout.title(&format!("Rule: {}", rule.id));
    layout.kv("Name", &rule.name);
    layout.kv("Category", &rule.category.to_string());
    layout.kv("Severity", &rule.default_severity.to_string());
    if !rule.depends_on.is_empty() {
        layout.kv("Depends on", &rule.depends_on.join(", "));
    }
    layout.kv("Enabled", if rule.disabled { "no" } else { "yes" });
    layout.blank();
    layout.section("Description");
    layout.push_line(rule.description);
    emit_human(layout);
    Ok(())
}
