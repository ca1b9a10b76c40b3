//! Validation engine for running rules over a concept graph.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::config::{ConceptOrder, ValidationConfig, ValidationContext};
use super::diagnostic::{Finding, RuleCategory, Severity};
use super::report::Reporter;
use super::rule::{BoxedRule, ValidationRule};
use crate::ontology::{Concept, ConceptGraph, IdRegistry};

/// The validation engine that manages and runs rules
pub struct ValidationEngine {
    rules: Vec<BoxedRule>,
    config: ValidationConfig,
}

impl ValidationEngine {
    /// Create a new validation engine with the given config
    #[must_use]
    pub const fn new(config: ValidationConfig) -> Self {
        Self {
            rules: Vec::new(),
            config,
        }
    }

    /// Create a new engine with default config
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Register a validation rule. Rules run in registration order.
    pub fn register(&mut self, rule: BoxedRule) {
        for dependency in rule.depends_on() {
            if self.find(dependency).is_none() {
                warn!(
                    rule = rule.id(),
                    dependency, "rule registered before its dependency; it will not run"
                );
            }
        }
        self.rules.push(rule);
    }

    /// Register a validation rule (builder pattern)
    #[must_use]
    pub fn with_rule(mut self, rule: BoxedRule) -> Self {
        self.register(rule);
        self
    }

    /// Get registered rules
    #[must_use]
    pub fn rules(&self) -> &[BoxedRule] {
        &self.rules
    }

    /// Get the config
    #[must_use]
    pub const fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Set the config
    pub fn set_config(&mut self, config: ValidationConfig) {
        self.config = config;
    }

    /// Build the id registry and run every active rule over the graph.
    #[must_use]
    pub fn validate(&self, graph: &ConceptGraph) -> Reporter {
        let registry = IdRegistry::build(graph);
        let ctx = ValidationContext::new(graph, &registry, &self.config);
        let mut reporter = Reporter::new().with_max_errors(self.config.max_errors);
        self.validate_with_context(&ctx, &mut reporter);
        reporter
    }

    /// Run rule by rule, streaming findings into `reporter`.
    ///
    /// Findings come out rule-major, then in concept visiting order.
    pub fn validate_with_context(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter) {
        let order = visit_order(ctx.graph, self.config.order);

        for rule in &self.rules {
            if !self.is_active(rule.as_ref()) {
                debug!(rule = rule.id(), "skipping inactive rule");
                continue;
            }

            let started = Instant::now();
            let findings = self.evaluate(rule.as_ref(), ctx, &order);
            debug!(
                rule = rule.id(),
                findings = findings.len(),
                elapsed = ?started.elapsed(),
                "rule evaluated"
            );

            for finding in findings {
                let finding = self.finalize(rule.as_ref(), finding);
                if !reporter.record(finding) {
                    info!(
                        max_errors = self.config.max_errors,
                        "error limit reached, stopping"
                    );
                    return;
                }
            }
        }
    }

    fn evaluate(
        &self,
        rule: &dyn ValidationRule,
        ctx: &ValidationContext<'_>,
        order: &[&Concept],
    ) -> Vec<Finding> {
        if self.config.parallel {
            order
                .par_iter()
                .flat_map_iter(|concept| rule.validate(ctx, concept))
                .collect()
        } else {
            order
                .iter()
                .flat_map(|concept| rule.validate(ctx, concept))
                .collect()
        }
    }

    fn finalize(&self, rule: &dyn ValidationRule, mut finding: Finding) -> Finding {
        finding.severity = self
            .config
            .effective_severity(&finding.rule_id, finding.severity);
        if self.config.order == ConceptOrder::Identity {
            finding
                .targets
                .sort_by(|a, b| a.identity.cmp(&b.identity));
        }
        finding.with_category(rule.category())
    }

    /// A rule runs when it is enabled and every dependency is registered
    /// and itself active.
    #[must_use]
    pub fn is_active(&self, rule: &dyn ValidationRule) -> bool {
        if self.config.is_rule_disabled(rule.id()) {
            return false;
        }
        rule.depends_on().iter().all(|dependency| {
            self.find(dependency)
                .is_some_and(|dep| dep.id() != rule.id() && self.is_active(dep))
        })
    }

    fn find(&self, rule_id: &str) -> Option<&dyn ValidationRule> {
        self.rules
            .iter()
            .find(|r| r.id() == rule_id)
            .map(|rule| rule.as_ref())
    }

    /// List all registered rules
    #[must_use]
    pub fn list_rules(&self) -> Vec<RuleInfo> {
        self.rules
            .iter()
            .map(|r| RuleInfo {
                id: r.id().to_string(),
                name: r.name().to_string(),
                description: r.description().to_string(),
                category: r.category(),
                default_severity: r.default_severity(),
                depends_on: r.depends_on().iter().map(ToString::to_string).collect(),
                disabled: !self.is_active(r.as_ref()),
            })
            .collect()
    }
}

fn visit_order(graph: &ConceptGraph, order: ConceptOrder) -> Vec<&Concept> {
    let mut concepts: Vec<&Concept> = graph.concepts().iter().collect();
    if order == ConceptOrder::Identity {
        concepts.sort_by(|a, b| a.identity.cmp(&b.identity));
    }
    concepts
}

/// Information about a registered rule
#[derive(Debug, Clone, serde::Serialize)]
pub struct RuleInfo {
    /// Rule ID
    pub id: String,
    /// Rule name
    pub name: String,
    /// Rule description
    pub description: String,
    /// Rule category
    pub category: RuleCategory,
    /// Default severity
    pub default_severity: Severity,
    /// Rules this one builds on
    pub depends_on: Vec<String>,
    /// Whether the rule is disabled, directly or through a dependency
    pub disabled: bool,
}
