//! Structural rules: the shape of a single concept.

use crate::impl_rule;
use crate::lint::config::ValidationContext;
use crate::lint::diagnostic::{Finding, RuleCategory, Severity};
use crate::lint::rule::ValidationRule;
use crate::ontology::Concept;

impl_rule!(
    LabelFormatRule,
    id: "label-format",
    name: "Label Punctuation",
    description: "Labels must not end with a full stop",
    category: RuleCategory::Structure,
    severity: Severity::Error,
    validate: |_ctx, concept| {
        if concept.label.ends_with('.') {
            vec![Finding::error("label-format", "label ends with '.'", concept, concept)]
        } else {
            vec![]
        }
    }
);

impl_rule!(
    SelfSuperclassRule,
    id: "self-superclass",
    name: "No Self Superclass",
    description: "A concept must not be declared a subclass of itself",
    category: RuleCategory::Structure,
    severity: Severity::Error,
    validate: |_ctx, concept| {
        if concept.superclasses.contains(&concept.identity) {
            vec![Finding::error("self-superclass", "self superclass", concept, concept)]
        } else {
            vec![]
        }
    }
);

/// Rule that detects synonyms shared by concepts of the same axis.
pub struct SynonymCollisionRule;

impl ValidationRule for SynonymCollisionRule {
    fn id(&self) -> &'static str {
        "synonym-collision"
    }

    fn name(&self) -> &'static str {
        "Unique Synonyms Per Axis"
    }

    fn description(&self) -> &'static str {
        "A synonym string may appear on only one concept of each axis, in any synonym slot"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Structure
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn validate(&self, ctx: &ValidationContext<'_>, concept: &Concept) -> Vec<Finding> {
        let mut findings = Vec::new();
        for text in concept.distinct_synonyms() {
            let others: Vec<&Concept> = ctx
                .graph
                .with_synonym(text)
                .filter(|other| other.axis() == concept.axis())
                .filter(|other| other.identity != concept.identity)
                .collect();
            let Some((first, rest)) = others.split_first() else {
                continue;
            };
            findings.push(
                Finding::error(
                    self.id(),
                    format!("synonym '{text}' shared within axis '{}'", concept.axis()),
                    concept,
                    *first,
                )
                .with_targets(rest.iter().copied()),
            );
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::config::ValidationConfig;
    use crate::ontology::{ConceptGraph, IdRegistry, SynonymKind};

    fn concept(id: &str) -> Concept {
        Concept::new(format!("http://edamontology.org/{id}")).unwrap()
    }

    fn run(rule: &dyn ValidationRule, concepts: Vec<Concept>) -> Vec<Finding> {
        let graph = ConceptGraph::new(1000, concepts);
        let registry = IdRegistry::build(&graph);
        let config = ValidationConfig::new();
        let ctx = ValidationContext::new(&graph, &registry, &config);
        graph
            .concepts()
            .iter()
            .flat_map(|c| rule.validate(&ctx, c))
            .collect()
    }

    #[test]
    fn trailing_full_stop_is_an_error() {
        let findings = run(
            &LabelFormatRule,
            vec![
                concept("data_0001").with_label("Foo."),
                concept("data_0002").with_label("Foo"),
                concept("data_0003"),
            ],
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].source.label.as_deref(), Some("Foo."));
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn self_superclass_reported_once() {
        let own = "http://edamontology.org/data_0001";
        let findings = run(
            &SelfSuperclassRule,
            vec![
                concept("data_0001")
                    .with_superclass("http://edamontology.org/data_0000")
                    .with_superclass(own)
                    .with_superclass("http://edamontology.org/data_0005")
                    .with_superclass(own),
                concept("data_0002").with_superclass(own),
            ],
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].source.identity, own);
    }

    #[test]
    fn synonym_collision_within_axis() {
        let findings = run(
            &SynonymCollisionRule,
            vec![
                concept("data_0001").with_synonym(SynonymKind::Exact, "sequence"),
                concept("data_0002").with_synonym(SynonymKind::Narrow, "sequence"),
                concept("format_0003").with_synonym(SynonymKind::Exact, "sequence"),
            ],
        );

        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].source.identity, "http://edamontology.org/data_0001");
        assert_eq!(
            findings[0].primary_target().identity,
            "http://edamontology.org/data_0002"
        );
        assert_eq!(findings[0].targets.len(), 1);
        assert_eq!(findings[1].source.identity, "http://edamontology.org/data_0002");
    }

    #[test]
    fn synonym_across_axes_or_repeated_on_one_concept_is_fine() {
        let findings = run(
            &SynonymCollisionRule,
            vec![
                concept("data_0001")
                    .with_synonym(SynonymKind::Exact, "alignment")
                    .with_synonym(SynonymKind::Broad, "alignment"),
                concept("operation_0002").with_synonym(SynonymKind::Exact, "alignment"),
            ],
        );
        assert!(findings.is_empty());
    }
}
