//! Reference rules: what a concept points at.

use crate::lint::config::ValidationContext;
use crate::lint::diagnostic::{ConceptRef, Finding, RuleCategory, Severity};
use crate::lint::rule::ValidationRule;
use crate::ontology::parser::{OWL_NS, RDF_NS, RDFS_NS};
use crate::ontology::{Concept, RelationKind};

/// Rule that flags relation targets which are deprecated.
pub struct DeprecatedRelationTargetRule;

impl ValidationRule for DeprecatedRelationTargetRule {
    fn id(&self) -> &'static str {
        "deprecated-relation-target"
    }

    fn name(&self) -> &'static str {
        "Live Relation Targets"
    }

    fn description(&self) -> &'static str {
        "has_topic, is_format_of, has_input, has_output and is_identifier_of must not point at deprecated concepts"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Reference
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn validate(&self, ctx: &ValidationContext<'_>, concept: &Concept) -> Vec<Finding> {
        RelationKind::ALL
            .into_iter()
            .flat_map(move |kind| {
                concept
                    .targets(kind)
                    .filter_map(move |identity| ctx.resolve(identity))
                    .filter(|target| target.deprecated)
                    .map(move |target| {
                        Finding::error(
                            self.id(),
                            format!("deprecated {}", kind.noun()),
                            concept,
                            target,
                        )
                    })
            })
            .collect()
    }
}

/// Rule that flags deprecated superclasses.
pub struct DeprecatedSuperclassRule;

impl ValidationRule for DeprecatedSuperclassRule {
    fn id(&self) -> &'static str {
        "deprecated-superclass"
    }

    fn name(&self) -> &'static str {
        "Live Superclasses"
    }

    fn description(&self) -> &'static str {
        "A concept must not be a subclass of a deprecated concept"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Reference
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn validate(&self, ctx: &ValidationContext<'_>, concept: &Concept) -> Vec<Finding> {
        concept
            .superclasses
            .iter()
            .filter_map(|identity| ctx.resolve(identity))
            .filter(|parent| parent.deprecated)
            .map(|parent| Finding::error(self.id(), "deprecated superclass", concept, parent))
            .collect()
    }
}

/// Rule that reports references to identities missing from the document.
///
/// References into the RDF, RDFS and OWL vocabularies (`owl:Thing`) are
/// not expected to resolve and are skipped.
pub struct UnresolvedReferenceRule;

impl UnresolvedReferenceRule {
    fn is_vocabulary(identity: &str) -> bool {
        [RDF_NS, RDFS_NS, OWL_NS]
            .iter()
            .any(|ns| identity.starts_with(ns))
    }
}

impl ValidationRule for UnresolvedReferenceRule {
    fn id(&self) -> &'static str {
        "unresolved-reference"
    }

    fn name(&self) -> &'static str {
        "Resolvable References"
    }

    fn description(&self) -> &'static str {
        "Superclass, relation, consider and replacedBy references must name a concept of the document"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Reference
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn validate(&self, ctx: &ValidationContext<'_>, concept: &Concept) -> Vec<Finding> {
        concept
            .references()
            .filter(|(_, identity)| !Self::is_vocabulary(identity))
            .filter(|(_, identity)| ctx.resolve(identity).is_none())
            .map(|(kind, identity)| {
                Finding::warning(
                    self.id(),
                    format!("unresolved {kind} reference"),
                    concept,
                    ConceptRef::unresolved(identity),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::config::ValidationConfig;
    use crate::lint::diagnostic::NO_LABEL;
    use crate::ontology::{ConceptGraph, IdRegistry};

    const OP: &str = "http://edamontology.org/operation_0001";
    const DATA_LIVE: &str = "http://edamontology.org/data_0002";
    const DATA_OLD: &str = "http://edamontology.org/data_0003";
    const TOPIC_OLD: &str = "http://edamontology.org/topic_0004";

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

    fn targets() -> Vec<Concept> {
        vec![
            Concept::new(DATA_LIVE).unwrap().with_label("Live"),
            Concept::new(DATA_OLD).unwrap().with_label("Old").deprecated(),
            Concept::new(TOPIC_OLD).unwrap().deprecated(),
        ]
    }

    #[test]
    fn deprecated_input_is_reported_once() {
        let mut concepts = vec![
            Concept::new(OP)
                .unwrap()
                .with_label("Align")
                .with_relation(RelationKind::HasInput, DATA_OLD)
                .with_relation(RelationKind::HasOutput, DATA_LIVE),
        ];
        concepts.extend(targets());

        let findings = run(&DeprecatedRelationTargetRule, concepts);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "deprecated input");
        assert_eq!(findings[0].source.identity, OP);
        assert_eq!(findings[0].primary_target().identity, DATA_OLD);
    }

    #[test]
    fn relation_kinds_are_named_in_order() {
        let mut concepts = vec![
            Concept::new(OP)
                .unwrap()
                .with_relation(RelationKind::HasOutput, DATA_OLD)
                .with_relation(RelationKind::HasTopic, TOPIC_OLD)
                .with_relation(RelationKind::IsIdentifierOf, DATA_OLD)
                .with_relation(RelationKind::HasTopic, "http://edamontology.org/topic_0999"),
        ];
        concepts.extend(targets());

        let messages: Vec<String> = run(&DeprecatedRelationTargetRule, concepts)
            .into_iter()
            .map(|f| f.message)
            .collect();
        assert_eq!(
            messages,
            ["deprecated topic", "deprecated output", "deprecated identifier"]
        );
    }

    #[test]
    fn deprecated_superclasses_each_reported() {
        let mut concepts = vec![
            Concept::new(OP)
                .unwrap()
                .with_superclass(DATA_OLD)
                .with_superclass(DATA_LIVE)
                .with_superclass(TOPIC_OLD),
        ];
        concepts.extend(targets());

        let findings = run(&DeprecatedSuperclassRule, concepts);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[1].primary_target().identity, TOPIC_OLD);
        assert_eq!(findings[1].primary_target().display_label(), NO_LABEL);
    }

    #[test]
    fn dangling_references_are_reported_as_warnings() {
        let findings = run(
            &UnresolvedReferenceRule,
            vec![
                Concept::new(OP)
                    .unwrap()
                    .with_superclass("http://www.w3.org/2002/07/owl#Thing")
                    .with_superclass("http://edamontology.org/operation_0404")
                    .with_relation(RelationKind::HasInput, DATA_LIVE)
                    .with_replaced_by("http://edamontology.org/operation_0405"),
                Concept::new(DATA_LIVE).unwrap(),
            ],
        );

        let messages: Vec<&str> = findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                "unresolved subClassOf reference",
                "unresolved replacedBy reference"
            ]
        );
        assert!(findings.iter().all(|f| f.severity == Severity::Warning));
        assert_eq!(
            findings[0].primary_target().identity,
            "http://edamontology.org/operation_0404"
        );
    }
}
