//! RDF/XML reader for EDAM documents.
//!
//! Only the parts of the OWL serialization that the checks look at are
//! extracted: top-level `owl:Class` descriptions and the `next_id` of the
//! `owl:Ontology` header. Everything else is skipped.

use std::fmt;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use tracing::debug;

use super::concept::{RawConcept, RelationKind, Synonym, SynonymKind};
use crate::error::{Result, ValidatorError};

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";
pub const OBO_NS: &str = "http://www.geneontology.org/formats/oboInOwl#";

/// The document as read, before any identity is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OntologyDocument {
    /// Raw text of the `next_id` element, if present.
    pub next_id: Option<String>,
    /// Top-level classes in document order. A class described twice appears twice.
    pub concepts: Vec<RawConcept>,
}

/// Read and parse a document from disk.
pub fn read_document(path: &Path) -> Result<OntologyDocument> {
    let raw = std::fs::read_to_string(path).map_err(|source| ValidatorError::ReadDocument {
        path: path.to_path_buf(),
        source,
    })?;
    let document = parse_document(&raw)?;
    debug!(
        path = %path.display(),
        classes = document.concepts.len(),
        "parsed ontology document"
    );
    Ok(document)
}

/// Parse an RDF/XML string.
pub fn parse_document(xml: &str) -> Result<OntologyDocument> {
    let mut reader = NsReader::from_str(xml);
    let mut collector = Collector::default();

    loop {
        let (ns, event) = match reader.read_resolved_event() {
            Ok((ns, event)) => (Ns::classify(&ns), event),
            Err(err) => return Err(xml_error(reader.buffer_position(), &err)),
        };

        match event {
            Event::Start(start) => {
                let attrs = Attrs::read(&reader, &start)?;
                collector.open(ns, &local_name(&start), attrs);
            }
            Event::Empty(start) => {
                let attrs = Attrs::read(&reader, &start)?;
                collector.open(ns, &local_name(&start), attrs);
                collector.close();
            }
            Event::End(_) => collector.close(),
            Event::Text(text) => {
                if collector.wants_text() {
                    let text = text
                        .unescape()
                        .map_err(|err| xml_error(reader.buffer_position(), &err))?;
                    collector.text(&text);
                }
            }
            Event::CData(data) => {
                if collector.wants_text() {
                    collector.text(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof if collector.depth > 0 => {
                return Err(ValidatorError::Xml {
                    position: reader.buffer_position(),
                    message: format!("document ends inside {} open element(s)", collector.depth),
                });
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(collector.finish())
}

fn xml_error(position: usize, err: &dyn fmt::Display) -> ValidatorError {
    ValidatorError::Xml {
        position,
        message: err.to_string(),
    }
}

fn local_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

/// Namespaces the reader cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ns {
    Rdf,
    Rdfs,
    Owl,
    Obo,
    Other,
}

impl Ns {
    fn classify(resolved: &ResolveResult<'_>) -> Self {
        let ResolveResult::Bound(Namespace(uri)) = resolved else {
            return Self::Other;
        };
        match std::str::from_utf8(uri) {
            Ok(RDF_NS) => Self::Rdf,
            Ok(RDFS_NS) => Self::Rdfs,
            Ok(OWL_NS) => Self::Owl,
            Ok(OBO_NS) => Self::Obo,
            _ => Self::Other,
        }
    }
}

/// The two `rdf:` attributes used by class descriptions.
#[derive(Debug, Default)]
struct Attrs {
    about: Option<String>,
    resource: Option<String>,
}

impl Attrs {
    fn read(reader: &NsReader<&[u8]>, start: &BytesStart<'_>) -> Result<Self> {
        let mut attrs = Self::default();
        for attr in start.attributes() {
            let attr = attr.map_err(|err| xml_error(reader.buffer_position(), &err))?;
            let (ns, local) = reader.resolve_attribute(attr.key);
            if Ns::classify(&ns) != Ns::Rdf {
                continue;
            }
            let slot = match local.as_ref() {
                b"about" => &mut attrs.about,
                b"resource" => &mut attrs.resource,
                _ => continue,
            };
            let value = attr
                .unescape_value()
                .map_err(|err| xml_error(reader.buffer_position(), &err))?;
            *slot = Some(value.into_owned());
        }
        Ok(attrs)
    }
}

#[derive(Debug, Clone, Copy)]
enum Capture {
    Label,
    Deprecated,
    Synonym(SynonymKind),
    NextId,
}

#[derive(Debug, Default)]
struct Restriction {
    property: Option<String>,
    filler: Option<String>,
}

// Element depths: 1 = rdf:RDF, 2 = top-level description, 3 = its
// properties, 4 = owl:Restriction inside rdfs:subClassOf, 5 = restriction parts.
#[derive(Debug, Default)]
struct Collector {
    depth: usize,
    next_id: Option<String>,
    concepts: Vec<RawConcept>,
    current: Option<RawConcept>,
    in_ontology: bool,
    in_subclass: bool,
    restriction: Option<Restriction>,
    capture: Option<(Capture, usize, String)>,
}

impl Collector {
    fn open(&mut self, ns: Ns, local: &str, attrs: Attrs) {
        self.depth += 1;
        match self.depth {
            2 => match (ns, local) {
                (Ns::Owl, "Class") => {
                    self.current = attrs.about.map(RawConcept::new);
                }
                (Ns::Owl, "Ontology") => self.in_ontology = true,
                _ => {}
            },
            3 if self.in_ontology => {
                if local == "next_id" {
                    self.start_capture(Capture::NextId);
                }
            }
            3 => self.open_property(ns, local, attrs),
            4 if self.in_subclass => {
                if (ns, local) == (Ns::Owl, "Restriction") {
                    self.restriction = Some(Restriction::default());
                }
            }
            5 => {
                let Some(restriction) = self.restriction.as_mut() else {
                    return;
                };
                match (ns, local) {
                    (Ns::Owl, "onProperty") => restriction.property = attrs.resource,
                    (Ns::Owl, "someValuesFrom" | "allValuesFrom") => {
                        restriction.filler = attrs.resource;
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    fn open_property(&mut self, ns: Ns, local: &str, attrs: Attrs) {
        let Some(concept) = self.current.as_mut() else {
            return;
        };
        match (ns, local) {
            (Ns::Rdfs, "label") => self.start_capture(Capture::Label),
            (Ns::Owl, "deprecated") => self.start_capture(Capture::Deprecated),
            (Ns::Rdfs, "subClassOf") => match attrs.resource {
                Some(resource) => concept.superclasses.push(resource),
                None => self.in_subclass = true,
            },
            (Ns::Obo, "consider") => concept.consider.extend(attrs.resource),
            (Ns::Obo, "replacedBy") => concept.replaced_by.extend(attrs.resource),
            (Ns::Obo, other) => {
                if let Some(kind) = SynonymKind::from_element(other) {
                    self.start_capture(Capture::Synonym(kind));
                }
            }
            _ => {}
        }
    }

    fn close(&mut self) {
        let depth = self.depth;
        self.depth = self.depth.saturating_sub(1);

        if matches!(self.capture, Some((_, at, _)) if at == depth) {
            if let Some((capture, _, text)) = self.capture.take() {
                self.finish_capture(capture, text);
            }
        }

        match depth {
            4 => {
                if let Some(restriction) = self.restriction.take() {
                    self.finish_restriction(restriction);
                }
            }
            3 => self.in_subclass = false,
            2 => {
                if let Some(concept) = self.current.take() {
                    self.concepts.push(concept);
                }
                self.in_ontology = false;
            }
            _ => {}
        }
    }

    fn wants_text(&self) -> bool {
        matches!(self.capture, Some((_, at, _)) if at == self.depth)
    }

    fn text(&mut self, text: &str) {
        if let Some((_, _, buffer)) = self.capture.as_mut() {
            buffer.push_str(text);
        }
    }

    fn start_capture(&mut self, capture: Capture) {
        self.capture = Some((capture, self.depth, String::new()));
    }

    fn finish_capture(&mut self, capture: Capture, text: String) {
        if let Capture::NextId = capture {
            if self.next_id.is_none() {
                self.next_id = Some(text);
            }
            return;
        }
        let Some(concept) = self.current.as_mut() else {
            return;
        };
        match capture {
            Capture::Label => {
                if concept.label.is_none() {
                    concept.label = Some(text);
                }
            }
            Capture::Deprecated => {
                concept.deprecated |= text.trim().eq_ignore_ascii_case("true");
            }
            Capture::Synonym(kind) => concept.synonyms.push(Synonym { kind, text }),
            Capture::NextId => {}
        }
    }

    fn finish_restriction(&mut self, restriction: Restriction) {
        let Some(concept) = self.current.as_mut() else {
            return;
        };
        let (Some(property), Some(filler)) = (restriction.property, restriction.filler) else {
            return;
        };
        if let Some(kind) = RelationKind::from_property_iri(&property) {
            concept.relations.push((kind, filler));
        }
    }

    fn finish(self) -> OntologyDocument {
        OntologyDocument {
            next_id: self.next_id,
            concepts: self.concepts,
        }
    }
}
