//! Validation configuration.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::diagnostic::Severity;
use crate::ontology::{Concept, ConceptGraph, IdRegistry};

/// Order in which concepts are visited by every rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConceptOrder {
    /// As they appear in the document
    #[default]
    Document,
    /// Sorted by identity; target lists are sorted the same way
    Identity,
}

/// Configuration for validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Rules to disable by ID
    #[serde(default)]
    pub disabled_rules: HashSet<String>,

    /// Severity overrides by rule ID
    #[serde(default)]
    pub severity_overrides: HashMap<String, Severity>,

    /// Treat warnings as errors
    #[serde(default)]
    pub strict: bool,

    /// Maximum errors before stopping validation
    #[serde(default)]
    pub max_errors: Option<usize>,

    #[serde(default)]
    pub order: ConceptOrder,

    /// Evaluate each rule's per-concept checks on the rayon pool
    #[serde(default)]
    pub parallel: bool,
}

impl ValidationConfig {
    /// Create a new default config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable strict mode
    #[must_use]
    pub const fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Set max errors
    #[must_use]
    pub const fn with_max_errors(mut self, max: usize) -> Self {
        self.max_errors = Some(max);
        self
    }

    #[must_use]
    pub const fn with_order(mut self, order: ConceptOrder) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub const fn parallel(mut self) -> Self {
        self.parallel = true;
        self
    }

    /// Disable a rule
    #[must_use]
    pub fn disable_rule(mut self, rule_id: impl Into<String>) -> Self {
        self.disabled_rules.insert(rule_id.into());
        self
    }

    /// Override severity for a rule
    #[must_use]
    pub fn override_severity(mut self, rule_id: impl Into<String>, severity: Severity) -> Self {
        self.severity_overrides.insert(rule_id.into(), severity);
        self
    }

    /// Check if a rule is disabled
    #[must_use]
    pub fn is_rule_disabled(&self, rule_id: &str) -> bool {
        self.disabled_rules.contains(rule_id)
    }

    /// Get effective severity for a rule
    #[must_use]
    pub fn effective_severity(&self, rule_id: &str, default: Severity) -> Severity {
        let severity = self
            .severity_overrides
            .get(rule_id)
            .copied()
            .unwrap_or(default);

        if self.strict {
            Severity::Error
        } else {
            severity
        }
    }
}

/// Read-only view handed to every rule.
pub struct ValidationContext<'a> {
    pub graph: &'a ConceptGraph,
    pub registry: &'a IdRegistry<'a>,
    pub config: &'a ValidationConfig,
}

impl<'a> ValidationContext<'a> {
    #[must_use]
    pub const fn new(
        graph: &'a ConceptGraph,
        registry: &'a IdRegistry<'a>,
        config: &'a ValidationConfig,
    ) -> Self {
        Self {
            graph,
            registry,
            config,
        }
    }

    /// Resolve an identity against the graph.
    #[must_use]
    pub fn resolve(&self, identity: &str) -> Option<&'a Concept> {
        self.graph.resolve(identity)
    }

    /// The deprecated `replacedBy` target of a deprecated concept.
    ///
    /// Both replacement rules consume this single resolution. A live or
    /// missing target yields `None` and neither rule reports anything.
    #[must_use]
    pub fn obsolete_replacement(&self, concept: &Concept) -> Option<&'a Concept> {
        if !concept.deprecated {
            return None;
        }
        concept
            .replaced_by
            .as_deref()
            .and_then(|identity| self.resolve(identity))
            .filter(|target| target.deprecated)
    }
}
