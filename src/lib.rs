//! EDAM ontology consistency validation.
//!
//! The crate turns an EDAM OWL/XML document into a [`ontology::ConceptGraph`]
//! and runs the [`lint`] rules over it:
//!
//! ```
//! use edam_validator::lint::{ValidationConfig, Verdict, validate_graph};
//! use edam_validator::ontology::{ConceptGraph, parse_document};
//!
//! let xml = r#"<?xml version="1.0"?>
//! <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
//!          xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
//!          xmlns:owl="http://www.w3.org/2002/07/owl#">
//!   <owl:Ontology rdf:about="http://edamontology.org"><next_id>10</next_id></owl:Ontology>
//!   <owl:Class rdf:about="http://edamontology.org/topic_0003">
//!     <rdfs:label>Topic</rdfs:label>
//!   </owl:Class>
//! </rdf:RDF>"#;
//!
//! let graph = ConceptGraph::from_document(parse_document(xml)?)?;
//! let reporter = validate_graph(&graph, ValidationConfig::new());
//! assert_eq!(reporter.verdict(), Verdict::Pass);
//! # Ok::<(), edam_validator::ValidatorError>(())
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod lint;
pub mod ontology;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{Result, ValidatorError};
