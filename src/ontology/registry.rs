//! Numeric id registry.

use std::collections::BTreeMap;

use tracing::debug;

use super::concept::Concept;
use super::graph::{ConceptGraph, ConceptIndex};
use super::identity::NumericId;

/// Maps each numeric id to the concepts using it, in document order.
#[derive(Debug, Clone)]
pub struct IdRegistry<'g> {
    graph: &'g ConceptGraph,
    by_number: BTreeMap<NumericId, Vec<ConceptIndex>>,
}

impl<'g> IdRegistry<'g> {
    /// One pass over the graph.
    #[must_use]
    pub fn build(graph: &'g ConceptGraph) -> Self {
        let mut by_number: BTreeMap<NumericId, Vec<ConceptIndex>> = BTreeMap::new();
        for (index, concept) in graph.concepts().iter().enumerate() {
            by_number.entry(concept.number()).or_default().push(index);
        }
        let registry = Self { graph, by_number };
        debug!(
            ids = registry.by_number.len(),
            reused = registry.used_twice().len(),
            "built id registry"
        );
        registry
    }

    /// Concepts using `number`; empty if unused.
    #[must_use]
    pub fn lookup(&self, number: NumericId) -> Vec<&'g Concept> {
        self.by_number
            .get(&number)
            .map(|indexes| self.materialize(indexes))
            .unwrap_or_default()
    }

    /// Ids used by more than one concept.
    #[must_use]
    pub fn used_twice(&self) -> BTreeMap<NumericId, Vec<&'g Concept>> {
        self.by_number
            .iter()
            .filter(|(_, indexes)| indexes.len() > 1)
            .map(|(&number, indexes)| (number, self.materialize(indexes)))
            .collect()
    }

    /// Whether `number` is below the document's `next_id`.
    #[must_use]
    pub const fn is_allocated(&self, number: NumericId) -> bool {
        number < self.graph.next_id()
    }

    /// Whether `concept` is the first user of its id in document order.
    #[must_use]
    pub fn is_first_occupant(&self, concept: &Concept) -> bool {
        let first = self
            .by_number
            .get(&concept.number())
            .and_then(|indexes| indexes.first());
        match (first, self.graph.index_of(&concept.identity)) {
            (Some(first), Some(own)) => *first == own,
            _ => false,
        }
    }

    /// Number of distinct ids in use.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_number.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_number.is_empty()
    }

    fn materialize(&self, indexes: &[ConceptIndex]) -> Vec<&'g Concept> {
        let concepts = self.graph.concepts();
        indexes.iter().map(|&index| &concepts[index]).collect()
    }
}
