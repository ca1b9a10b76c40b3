//! Lifecycle rules for deprecated concepts and their successors.

use crate::lint::config::ValidationContext;
use crate::lint::diagnostic::{Finding, RuleCategory, Severity};
use crate::lint::rule::ValidationRule;
use crate::ontology::Concept;

/// Rule that flags deprecated concepts suggesting another deprecated concept.
pub struct ObsoleteConsiderRule;

impl ValidationRule for ObsoleteConsiderRule {
    fn id(&self) -> &'static str {
        "obsolete-consider-obsolete"
    }

    fn name(&self) -> &'static str {
        "Live Consider Target"
    }

    fn description(&self) -> &'static str {
        "A deprecated concept must not suggest a deprecated concept through consider"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Lifecycle
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn validate(&self, ctx: &ValidationContext<'_>, concept: &Concept) -> Vec<Finding> {
        if !concept.deprecated {
            return vec![];
        }
        concept
            .consider
            .as_deref()
            .and_then(|identity| ctx.resolve(identity))
            .filter(|target| target.deprecated)
            .map(|target| Finding::error(self.id(), "obsolete consider obsolete", concept, target))
            .into_iter()
            .collect()
    }
}

/// Rule that flags deprecated concepts replaced by another deprecated concept.
pub struct ObsoleteReplacedByRule;

impl ValidationRule for ObsoleteReplacedByRule {
    fn id(&self) -> &'static str {
        "obsolete-replaced-by-obsolete"
    }

    fn name(&self) -> &'static str {
        "Live Replacement"
    }

    fn description(&self) -> &'static str {
        "A deprecated concept must not be replaced by a deprecated concept"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Lifecycle
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn validate(&self, ctx: &ValidationContext<'_>, concept: &Concept) -> Vec<Finding> {
        ctx.obsolete_replacement(concept)
            .map(|target| {
                Finding::error(self.id(), "obsolete replacedBy obsolete", concept, target)
            })
            .into_iter()
            .collect()
    }
}

/// Rule that flags obsolete replacements crossing from one axis into another.
///
/// Only looks at the deprecated target [`ObsoleteReplacedByRule`] found, and
/// is switched off together with it.
pub struct CrossAxisReplacementRule;

impl ValidationRule for CrossAxisReplacementRule {
    fn id(&self) -> &'static str {
        "cross-axis-replacement"
    }

    fn name(&self) -> &'static str {
        "Same-Axis Replacement"
    }

    fn description(&self) -> &'static str {
        "A deprecated concept must be replaced by a concept of its own axis"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Lifecycle
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn depends_on(&self) -> &[&str] {
        &["obsolete-replaced-by-obsolete"]
    }

    fn validate(&self, ctx: &ValidationContext<'_>, concept: &Concept) -> Vec<Finding> {
        let Some(target) = ctx.obsolete_replacement(concept) else {
            return vec![];
        };
        if target.axis() == concept.axis() {
            return vec![];
        }
        vec![Finding::error(
            self.id(),
            format!(
                "obsolete '{}' term replacedBy '{}' term",
                concept.axis(),
                target.axis()
            ),
            concept,
            target,
        )]
    }
}
