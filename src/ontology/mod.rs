//! Ontology document model.
//!
//! - [`parser`] reads the RDF/XML serialization into raw class records
//! - [`ConceptGraph`] turns those into immutable, indexed [`Concept`]s
//! - [`IdRegistry`] groups concepts by the numeric part of their identity

pub mod concept;
pub mod graph;
pub mod identity;
pub mod parser;
pub mod registry;

use std::path::Path;

pub use concept::{Concept, RawConcept, ReferenceKind, RelationKind, Synonym, SynonymKind};
pub use graph::{ConceptGraph, ConceptIndex};
pub use identity::{ConceptId, NumericId};
pub use parser::{OntologyDocument, parse_document, read_document};
pub use registry::IdRegistry;

use crate::error::Result;

/// Read a document from disk and build its concept graph.
pub fn load_graph(path: &Path) -> Result<ConceptGraph> {
    ConceptGraph::from_document(read_document(path)?)
}
