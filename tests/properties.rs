use proptest::prelude::*;

use edam_validator::lint::{ConceptOrder, Finding, ValidationConfig, validate_graph};
use edam_validator::ontology::{
    Concept, ConceptGraph, IdRegistry, RelationKind, SynonymKind, parse_document,
};
use edam_validator::test_utils::fixtures::{ClassSpec, OwlDocument};

const AXES: [&str; 4] = ["topic", "data", "format", "operation"];

/// Compact description of a class, referring to other classes by position.
#[derive(Debug, Clone)]
struct Shape {
    axis: usize,
    number: u32,
    deprecated: bool,
    dotted_label: bool,
    superclass: Option<usize>,
    input: Option<usize>,
    replaced_by: Option<usize>,
    synonym: Option<u8>,
}

fn arb_shape(len: usize) -> impl Strategy<Value = Shape> {
    (
        0..AXES.len(),
        0u32..40,
        any::<bool>(),
        any::<bool>(),
        proptest::option::of(0..len),
        proptest::option::of(0..len),
        proptest::option::of(0..len),
        proptest::option::of(0u8..3),
    )
        .prop_map(
            |(axis, number, deprecated, dotted_label, superclass, input, replaced_by, synonym)| {
                Shape {
                    axis,
                    number,
                    deprecated,
                    dotted_label,
                    superclass,
                    input,
                    replaced_by,
                    synonym,
                }
            },
        )
}

fn arb_shapes() -> impl Strategy<Value = Vec<Shape>> {
    (1usize..12).prop_flat_map(|len| proptest::collection::vec(arb_shape(len), len))
}

/// Give every shape its own number, so identities are unique too.
fn distinct(mut shapes: Vec<Shape>) -> Vec<Shape> {
    for (number, shape) in (0u32..).zip(shapes.iter_mut()) {
        shape.number = number;
    }
    shapes
}

fn short_id(shape: &Shape) -> String {
    format!("{}_{:04}", AXES[shape.axis], shape.number)
}

fn iri(shape: &Shape) -> String {
    format!("http://edamontology.org/{}", short_id(shape))
}

fn concepts(shapes: &[Shape]) -> Vec<Concept> {
    shapes
        .iter()
        .map(|shape| {
            let label = if shape.dotted_label { "Term." } else { "Term" };
            let mut concept = Concept::new(iri(shape)).unwrap().with_label(label);
            if shape.deprecated {
                concept = concept.deprecated();
            }
            if let Some(target) = shape.superclass {
                concept = concept.with_superclass(iri(&shapes[target]));
            }
            if let Some(target) = shape.input {
                concept = concept.with_relation(RelationKind::HasInput, iri(&shapes[target]));
            }
            if let Some(target) = shape.replaced_by {
                concept = concept.with_replaced_by(iri(&shapes[target]));
            }
            if let Some(synonym) = shape.synonym {
                concept = concept.with_synonym(SynonymKind::Exact, format!("syn {synonym}"));
            }
            concept
        })
        .collect()
}

fn document(shapes: &[Shape]) -> String {
    shapes
        .iter()
        .fold(OwlDocument::new(30), |doc, shape| {
            let mut class = ClassSpec::new(&short_id(shape))
                .label(if shape.dotted_label { "Term." } else { "Term" });
            if shape.deprecated {
                class = class.deprecated();
            }
            if let Some(target) = shape.superclass {
                class = class.subclass_of(&short_id(&shapes[target]));
            }
            if let Some(target) = shape.input {
                class = class.relation(RelationKind::HasInput, &short_id(&shapes[target]));
            }
            if let Some(target) = shape.replaced_by {
                class = class.replaced_by(&short_id(&shapes[target]));
            }
            if let Some(synonym) = shape.synonym {
                class = class.synonym(SynonymKind::Exact, &format!("syn {synonym}"));
            }
            doc.class(class)
        })
        .render()
}

fn findings(graph: &ConceptGraph, config: ValidationConfig) -> Vec<Finding> {
    validate_graph(graph, config).into_findings()
}

proptest! {
    #[test]
    fn test_runs_are_deterministic(shapes in arb_shapes()) {
        let graph = ConceptGraph::new(30, concepts(&shapes));
        let first = findings(&graph, ValidationConfig::new());
        let second = findings(&graph, ValidationConfig::new());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_parallel_matches_sequential(shapes in arb_shapes()) {
        let graph = ConceptGraph::new(30, concepts(&shapes));
        let sequential = findings(&graph, ValidationConfig::new());
        let parallel = findings(&graph, ValidationConfig::new().parallel());
        prop_assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_parsing_is_idempotent(shapes in arb_shapes()) {
        let xml = document(&shapes);
        let first = ConceptGraph::from_document(parse_document(&xml).unwrap()).unwrap();
        let second = ConceptGraph::from_document(parse_document(&xml).unwrap()).unwrap();
        prop_assert_eq!(first.concepts(), second.concepts());
    }

    #[test]
    fn test_parsed_graph_matches_built_graph(shapes in arb_shapes().prop_map(distinct)) {
        let parsed = ConceptGraph::from_document(parse_document(&document(&shapes)).unwrap()).unwrap();
        let built = ConceptGraph::new(30, concepts(&shapes));
        prop_assert_eq!(
            findings(&parsed, ValidationConfig::new()),
            findings(&built, ValidationConfig::new())
        );
    }

    #[test]
    fn test_one_range_error_per_out_of_range_concept(shapes in arb_shapes(), next_id in 0u32..40) {
        let graph = ConceptGraph::new(next_id, concepts(&shapes));
        let expected = graph
            .concepts()
            .iter()
            .filter(|concept| concept.number() >= next_id)
            .count();
        let range_errors = findings(&graph, ValidationConfig::new())
            .into_iter()
            .filter(|f| f.rule_id == "id-range")
            .count();
        prop_assert_eq!(range_errors, expected);
    }

    #[test]
    fn test_reuse_warnings_are_k_minus_one(shapes in arb_shapes()) {
        let graph = ConceptGraph::new(30, concepts(&shapes));
        let registry = IdRegistry::build(&graph);
        let expected: usize = registry
            .used_twice()
            .values()
            .map(|occupants| occupants.len() - 1)
            .sum();
        let warnings = findings(&graph, ValidationConfig::new())
            .into_iter()
            .filter(|f| f.rule_id == "id-reuse")
            .count();
        prop_assert_eq!(warnings, expected);
    }

    #[test]
    fn test_identity_order_ignores_input_order(
        shapes in arb_shapes().prop_map(distinct).prop_flat_map(|shapes| {
            let len = shapes.len();
            (Just(shapes), Just((0..len).collect::<Vec<_>>()).prop_shuffle())
        })
    ) {
        let (shapes, permutation) = shapes;
        let original = concepts(&shapes);
        let shuffled: Vec<Concept> = permutation.iter().map(|&i| original[i].clone()).collect();

        let config = ValidationConfig::new().with_order(ConceptOrder::Identity);
        let a = findings(&ConceptGraph::new(30, original), config.clone());
        let b = findings(&ConceptGraph::new(30, shuffled), config);
        prop_assert_eq!(a, b);
    }
}
