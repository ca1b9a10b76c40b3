//! Numeric id allocation rules.

use crate::lint::config::ValidationContext;
use crate::lint::diagnostic::{Finding, RuleCategory, Severity};
use crate::lint::rule::ValidationRule;
use crate::ontology::Concept;

/// Rule that checks ids stay below the document's `next_id`.
pub struct IdRangeRule;

impl ValidationRule for IdRangeRule {
    fn id(&self) -> &'static str {
        "id-range"
    }

    fn name(&self) -> &'static str {
        "Id Below next_id"
    }

    fn description(&self) -> &'static str {
        "Every numeric id must be strictly lower than the ontology's next_id"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Identifier
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn validate(&self, ctx: &ValidationContext<'_>, concept: &Concept) -> Vec<Finding> {
        if ctx.registry.is_allocated(concept.number()) {
            return vec![];
        }
        vec![Finding::error(
            self.id(),
            "id equal or greater than next_id",
            concept,
            concept,
        )]
    }
}

/// Rule that reports numeric ids shared between concepts.
///
/// The first concept using an id (in document order) owns it; every later
/// occupant gets one warning listing all occupants.
pub struct IdReuseRule;

impl ValidationRule for IdReuseRule {
    fn id(&self) -> &'static str {
        "id-reuse"
    }

    fn name(&self) -> &'static str {
        "Unique Numeric Id"
    }

    fn description(&self) -> &'static str {
        "A numeric id should be used by a single concept across all axes"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Identifier
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn validate(&self, ctx: &ValidationContext<'_>, concept: &Concept) -> Vec<Finding> {
        let occupants = ctx.registry.lookup(concept.number());
        if occupants.len() < 2 || ctx.registry.is_first_occupant(concept) {
            return vec![];
        }
        let (first, rest) = occupants.split_at(1);
        vec![
            Finding::warning(self.id(), "id used more than once", concept, first[0])
                .with_targets(rest.iter().copied()),
        ]
    }
}
