//! Immutable concept graph with identity and synonym indexes.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, instrument};

use super::concept::{Concept, RawConcept};
use super::identity::NumericId;
use super::parser::OntologyDocument;
use crate::error::{Result, ValidatorError};

/// Index of a concept in document order.
pub type ConceptIndex = usize;

/// All concepts of one document, indexed for lookup.
#[derive(Debug, Clone)]
pub struct ConceptGraph {
    next_id: NumericId,
    concepts: Vec<Concept>,
    by_identity: HashMap<String, ConceptIndex>,
    by_synonym: HashMap<String, Vec<ConceptIndex>>,
}

impl ConceptGraph {
    /// Build the graph from a parsed document.
    ///
    /// Fails when `next_id` is missing or not a number, or when a class
    /// identity does not have the `<axis>_<number>` shape. Classes described
    /// more than once are merged into their first occurrence.
    #[instrument(level = "debug", skip_all, fields(classes = document.concepts.len()))]
    pub fn from_document(document: OntologyDocument) -> Result<Self> {
        let raw_next_id = document.next_id.ok_or(ValidatorError::MissingNextId)?;
        let next_id = raw_next_id
            .trim()
            .parse::<NumericId>()
            .map_err(|_| ValidatorError::InvalidNextId(raw_next_id.clone()))?;

        let mut merged: IndexMap<String, RawConcept> = IndexMap::new();
        for raw in document.concepts {
            match merged.get_mut(&raw.identity) {
                Some(existing) => {
                    debug!(identity = %raw.identity, "merging repeated class description");
                    existing.absorb(raw);
                }
                None => {
                    merged.insert(raw.identity.clone(), raw);
                }
            }
        }

        let concepts = merged
            .into_values()
            .map(Concept::from_raw)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(next_id, concepts))
    }

    /// Build a graph directly from concepts, in the given order.
    ///
    /// Later concepts with an identity already present are dropped.
    #[must_use]
    pub fn new(next_id: NumericId, concepts: Vec<Concept>) -> Self {
        let mut kept = Vec::with_capacity(concepts.len());
        let mut by_identity = HashMap::with_capacity(concepts.len());
        for concept in concepts {
            if by_identity.contains_key(&concept.identity) {
                continue;
            }
            by_identity.insert(concept.identity.clone(), kept.len());
            kept.push(concept);
        }

        let mut by_synonym: HashMap<String, Vec<ConceptIndex>> = HashMap::new();
        for (index, concept) in kept.iter().enumerate() {
            for text in concept.distinct_synonyms() {
                by_synonym.entry(text.to_string()).or_default().push(index);
            }
        }

        debug!(
            concepts = kept.len(),
            synonyms = by_synonym.len(),
            next_id,
            "built concept graph"
        );

        Self {
            next_id,
            concepts: kept,
            by_identity,
            by_synonym,
        }
    }

    /// Ceiling every numeric id must stay below.
    #[must_use]
    pub const fn next_id(&self) -> NumericId {
        self.next_id
    }

    /// All concepts in document order.
    #[must_use]
    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Exact-match lookup by identity.
    #[must_use]
    pub fn resolve(&self, identity: &str) -> Option<&Concept> {
        self.by_identity
            .get(identity)
            .map(|&index| &self.concepts[index])
    }

    /// Document position of a concept.
    #[must_use]
    pub fn index_of(&self, identity: &str) -> Option<ConceptIndex> {
        self.by_identity.get(identity).copied()
    }

    /// Concepts carrying `text` in any synonym slot, in document order.
    pub fn with_synonym<'a>(&'a self, text: &str) -> impl Iterator<Item = &'a Concept> + use<'a> {
        self.by_synonym
            .get(text)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|&index| &self.concepts[index])
    }
}
