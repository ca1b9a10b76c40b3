//! Consistency linting for EDAM concept graphs.
//!
//! This module provides the rule framework and the built-in rules:
//!
//! - `ValidationRule` trait for implementing consistency rules
//! - `ValidationEngine` for running rules against a concept graph
//! - `Finding` for reporting a violation between two concepts
//! - `Reporter` for accumulating findings and deciding the verdict
//! - `ValidationConfig` for configuring rule behavior
//!
//! # Example
//!
//! ```
//! use edam_validator::lint::{Finding, RuleCategory, Severity, ValidationEngine, ValidationRule};
//! use edam_validator::lint::config::ValidationContext;
//! use edam_validator::ontology::{Concept, ConceptGraph};
//!
//! struct UnlabelledRule;
//!
//! impl ValidationRule for UnlabelledRule {
//!     fn id(&self) -> &str { "unlabelled" }
//!     fn name(&self) -> &str { "Unlabelled" }
//!     fn description(&self) -> &str { "Every concept needs a label" }
//!     fn category(&self) -> RuleCategory { RuleCategory::Structure }
//!     fn default_severity(&self) -> Severity { Severity::Warning }
//!     fn validate(&self, _ctx: &ValidationContext<'_>, concept: &Concept) -> Vec<Finding> {
//!         if concept.label().is_some() {
//!             return vec![];
//!         }
//!         vec![Finding::warning(self.id(), "no label", concept, concept)]
//!     }
//! }
//!
//! let mut engine = ValidationEngine::with_defaults();
//! engine.register(Box::new(UnlabelledRule));
//!
//! let graph = ConceptGraph::new(10, vec![
//!     Concept::new("http://edamontology.org/topic_0001").unwrap(),
//! ]);
//! let reporter = engine.validate(&graph);
//!
//! assert_eq!(reporter.warning_count(), 1);
//! assert!(reporter.verdict().is_pass());
//! ```

pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod report;
pub mod rule;
pub mod rules;

// Re-export main types for convenience
pub use config::{ConceptOrder, ValidationConfig, ValidationContext};
pub use diagnostic::{ConceptRef, Finding, NO_LABEL, RuleCategory, Severity};
pub use engine::{RuleInfo, ValidationEngine};
pub use report::{Reporter, Verdict};
pub use rule::{BoxedRule, ValidationRule};

// Re-export rule collection functions
pub use rules::{all_rules, identifier_rules, lifecycle_rules, select};

use crate::ontology::ConceptGraph;

/// Run every built-in rule over `graph` with `config`.
#[must_use]
pub fn validate_graph(graph: &ConceptGraph, config: ValidationConfig) -> Reporter {
    let mut engine = ValidationEngine::new(config);
    for rule in all_rules() {
        engine.register(rule);
    }
    engine.validate(graph)
}
