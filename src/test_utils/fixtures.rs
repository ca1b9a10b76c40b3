//! Builders for EDAM RDF/XML documents used by tests and benches.

use std::fmt::Write as _;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::ontology::{RelationKind, SynonymKind};

const EDAM: &str = "http://edamontology.org/";

/// Full EDAM IRI for a short identity such as `topic_0003`.
#[must_use]
pub fn edam_iri(short: &str) -> String {
    if short.contains("://") {
        short.to_string()
    } else {
        format!("{EDAM}{short}")
    }
}

/// One `owl:Class` description.
#[derive(Debug, Clone, Default)]
pub struct ClassSpec {
    identity: String,
    label: Option<String>,
    deprecated: bool,
    superclasses: Vec<String>,
    relations: Vec<(RelationKind, String)>,
    synonyms: Vec<(SynonymKind, String)>,
    consider: Option<String>,
    replaced_by: Option<String>,
}

impl ClassSpec {
    /// A class with identity `short` (`topic_0003`) or a full IRI.
    #[must_use]
    pub fn new(short: &str) -> Self {
        Self {
            identity: edam_iri(short),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    #[must_use]
    pub const fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    #[must_use]
    pub fn subclass_of(mut self, short: &str) -> Self {
        self.superclasses.push(edam_iri(short));
        self
    }

    #[must_use]
    pub fn relation(mut self, kind: RelationKind, short: &str) -> Self {
        self.relations.push((kind, edam_iri(short)));
        self
    }

    #[must_use]
    pub fn synonym(mut self, kind: SynonymKind, text: &str) -> Self {
        self.synonyms.push((kind, text.to_string()));
        self
    }

    #[must_use]
    pub fn consider(mut self, short: &str) -> Self {
        self.consider = Some(edam_iri(short));
        self
    }

    #[must_use]
    pub fn replaced_by(mut self, short: &str) -> Self {
        self.replaced_by = Some(edam_iri(short));
        self
    }

    fn render(&self, out: &mut String) {
        let _ = writeln!(out, "  <owl:Class rdf:about=\"{}\">", escape(&self.identity));
        if let Some(label) = &self.label {
            let _ = writeln!(out, "    <rdfs:label>{}</rdfs:label>", escape(label));
        }
        for superclass in &self.superclasses {
            let _ = writeln!(
                out,
                "    <rdfs:subClassOf rdf:resource=\"{}\"/>",
                escape(superclass)
            );
        }
        for (kind, target) in &self.relations {
            let _ = writeln!(
                out,
                "    <rdfs:subClassOf>\n      <owl:Restriction>\n        \
                 <owl:onProperty rdf:resource=\"{EDAM}{}\"/>\n        \
                 <owl:someValuesFrom rdf:resource=\"{}\"/>\n      \
                 </owl:Restriction>\n    </rdfs:subClassOf>",
                kind.property_name(),
                escape(target)
            );
        }
        for (kind, text) in &self.synonyms {
            let element = match kind {
                SynonymKind::Exact => "hasExactSynonym",
                SynonymKind::Narrow => "hasNarrowSynonym",
                SynonymKind::Broad => "hasBroadSynonym",
            };
            let _ = writeln!(
                out,
                "    <oboInOwl:{element}>{}</oboInOwl:{element}>",
                escape(text)
            );
        }
        if let Some(consider) = &self.consider {
            let _ = writeln!(
                out,
                "    <oboInOwl:consider rdf:resource=\"{}\"/>",
                escape(consider)
            );
        }
        if let Some(replaced_by) = &self.replaced_by {
            let _ = writeln!(
                out,
                "    <oboInOwl:replacedBy rdf:resource=\"{}\"/>",
                escape(replaced_by)
            );
        }
        if self.deprecated {
            out.push_str(
                "    <owl:deprecated rdf:datatype=\"http://www.w3.org/2001/XMLSchema#boolean\">true</owl:deprecated>\n",
            );
        }
        out.push_str("  </owl:Class>\n");
    }
}

/// A whole EDAM document.
#[derive(Debug, Clone, Default)]
pub struct OwlDocument {
    next_id: Option<String>,
    classes: Vec<ClassSpec>,
}

impl OwlDocument {
    #[must_use]
    pub fn new(next_id: u32) -> Self {
        Self {
            next_id: Some(next_id.to_string()),
            classes: Vec::new(),
        }
    }

    /// A document whose ontology header carries no `next_id`.
    #[must_use]
    pub fn without_next_id() -> Self {
        Self::default()
    }

    /// Use a raw `next_id` text, which need not be a number.
    #[must_use]
    pub fn raw_next_id(mut self, text: &str) -> Self {
        self.next_id = Some(text.to_string());
        self
    }

    #[must_use]
    pub fn class(mut self, class: ClassSpec) -> Self {
        self.classes.push(class);
        self
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from(
            "<?xml version=\"1.0\"?>\n\
             <rdf:RDF xmlns=\"http://edamontology.org/\"\n     \
             xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\"\n     \
             xmlns:rdfs=\"http://www.w3.org/2000/01/rdf-schema#\"\n     \
             xmlns:owl=\"http://www.w3.org/2002/07/owl#\"\n     \
             xmlns:oboInOwl=\"http://www.geneontology.org/formats/oboInOwl#\">\n",
        );
        out.push_str("  <owl:Ontology rdf:about=\"http://edamontology.org\">\n");
        if let Some(next_id) = &self.next_id {
            let _ = writeln!(out, "    <next_id>{}</next_id>", escape(next_id));
        }
        out.push_str("  </owl:Ontology>\n");
        for class in &self.classes {
            class.render(&mut out);
        }
        out.push_str("</rdf:RDF>\n");
        out
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Test fixture providing an isolated directory for documents and configs.
pub struct DocumentFixture {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for DocumentFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    /// Write a file relative to the fixture root.
    #[must_use]
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.root.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Write a rendered document as `EDAM.owl`.
    #[must_use]
    pub fn write_document(&self, document: &OwlDocument) -> PathBuf {
        self.create_file("EDAM.owl", &document.render())
    }
}
