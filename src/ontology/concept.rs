//! Concept model: one `owl:Class` of the ontology.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::identity::{ConceptId, NumericId};
use crate::error::Result;

/// Object properties whose targets are checked for deprecation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    HasTopic,
    IsFormatOf,
    HasInput,
    HasOutput,
    IsIdentifierOf,
}

impl RelationKind {
    /// All kinds, in the order their targets are checked.
    pub const ALL: [Self; 5] = [
        Self::HasTopic,
        Self::IsFormatOf,
        Self::HasInput,
        Self::HasOutput,
        Self::IsIdentifierOf,
    ];

    /// Local name of the property IRI (`http://edamontology.org/<name>`).
    #[must_use]
    pub const fn property_name(self) -> &'static str {
        match self {
            Self::HasTopic => "has_topic",
            Self::IsFormatOf => "is_format_of",
            Self::HasInput => "has_input",
            Self::HasOutput => "has_output",
            Self::IsIdentifierOf => "is_identifier_of",
        }
    }

    /// Noun used in finding messages ("deprecated input").
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::HasTopic => "topic",
            Self::IsFormatOf => "format",
            Self::HasInput => "input",
            Self::HasOutput => "output",
            Self::IsIdentifierOf => "identifier",
        }
    }

    /// Match a property IRI by its local name.
    #[must_use]
    pub fn from_property_iri(iri: &str) -> Option<Self> {
        let local = iri.rsplit(['/', '#']).next().unwrap_or(iri);
        Self::ALL.into_iter().find(|kind| kind.property_name() == local)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.property_name())
    }
}

/// Which `oboInOwl` synonym slot a synonym came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynonymKind {
    Exact,
    Narrow,
    Broad,
}

impl SynonymKind {
    #[must_use]
    pub fn from_element(local_name: &str) -> Option<Self> {
        match local_name {
            "hasExactSynonym" => Some(Self::Exact),
            "hasNarrowSynonym" => Some(Self::Narrow),
            "hasBroadSynonym" => Some(Self::Broad),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Synonym {
    pub kind: SynonymKind,
    pub text: String,
}

/// How a concept points at another identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Superclass,
    Relation(RelationKind),
    Consider,
    ReplacedBy,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Superclass => f.write_str("subClassOf"),
            Self::Relation(kind) => write!(f, "{kind}"),
            Self::Consider => f.write_str("consider"),
            Self::ReplacedBy => f.write_str("replacedBy"),
        }
    }
}

/// Fields of a class as read from the document, before identity parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConcept {
    pub identity: String,
    pub label: Option<String>,
    pub deprecated: bool,
    pub superclasses: Vec<String>,
    pub consider: Vec<String>,
    pub replaced_by: Vec<String>,
    pub synonyms: Vec<Synonym>,
    pub relations: Vec<(RelationKind, String)>,
}

impl RawConcept {
    #[must_use]
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            ..Self::default()
        }
    }

    /// Fold a second description of the same class into this one.
    pub fn absorb(&mut self, other: Self) {
        if self.label.is_none() {
            self.label = other.label;
        }
        self.deprecated |= other.deprecated;
        self.superclasses.extend(other.superclasses);
        self.consider.extend(other.consider);
        self.replaced_by.extend(other.replaced_by);
        self.synonyms.extend(other.synonyms);
        self.relations.extend(other.relations);
    }
}

/// A resolved-identity ontology term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concept {
    pub identity: String,
    pub id: ConceptId,
    pub label: String,
    pub deprecated: bool,
    pub superclasses: IndexSet<String>,
    pub consider: Option<String>,
    pub replaced_by: Option<String>,
    pub synonyms: Vec<Synonym>,
    pub relations: IndexMap<RelationKind, IndexSet<String>>,
}

impl Concept {
    /// Create an undeprecated, unlabelled concept.
    pub fn new(identity: impl Into<String>) -> Result<Self> {
        let identity = identity.into();
        let id = ConceptId::parse(&identity)?;
        Ok(Self {
            identity,
            id,
            label: String::new(),
            deprecated: false,
            superclasses: IndexSet::new(),
            consider: None,
            replaced_by: None,
            synonyms: Vec::new(),
            relations: IndexMap::new(),
        })
    }

    /// Convert a document record. Only the first consider/replacedBy is kept.
    pub fn from_raw(raw: RawConcept) -> Result<Self> {
        let mut concept = Self::new(raw.identity)?;
        concept.label = raw.label.unwrap_or_default();
        concept.deprecated = raw.deprecated;
        concept.superclasses = raw.superclasses.into_iter().collect();
        concept.consider = raw.consider.into_iter().next();
        concept.replaced_by = raw.replaced_by.into_iter().next();
        concept.synonyms = raw.synonyms;
        for (kind, target) in raw.relations {
            concept.relations.entry(kind).or_default().insert(target);
        }
        Ok(concept)
    }

    #[must_use]
    pub fn axis(&self) -> &str {
        &self.id.axis
    }

    #[must_use]
    pub const fn number(&self) -> NumericId {
        self.id.number
    }

    /// Label for display, `None` when the class has no `rdfs:label`.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        (!self.label.is_empty()).then_some(self.label.as_str())
    }

    /// Targets of one relation kind, in document order.
    pub fn targets(&self, kind: RelationKind) -> impl Iterator<Item = &str> {
        self.relations
            .get(&kind)
            .into_iter()
            .flat_map(|targets| targets.iter().map(String::as_str))
    }

    /// Every outgoing identity reference with the way it is made.
    pub fn references(&self) -> impl Iterator<Item = (ReferenceKind, &str)> {
        let superclasses = self
            .superclasses
            .iter()
            .map(|s| (ReferenceKind::Superclass, s.as_str()));
        let relations = RelationKind::ALL.into_iter().flat_map(move |kind| {
            self.targets(kind)
                .map(move |target| (ReferenceKind::Relation(kind), target))
        });
        let consider = self
            .consider
            .as_deref()
            .map(|c| (ReferenceKind::Consider, c));
        let replaced_by = self
            .replaced_by
            .as_deref()
            .map(|r| (ReferenceKind::ReplacedBy, r));
        superclasses
            .chain(relations)
            .chain(consider)
            .chain(replaced_by)
    }

    /// Distinct synonym strings, first occurrence order.
    #[must_use]
    pub fn distinct_synonyms(&self) -> IndexSet<&str> {
        self.synonyms.iter().map(|s| s.text.as_str()).collect()
    }

    // Builders, mostly for constructing graphs in code.

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub const fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    #[must_use]
    pub fn with_superclass(mut self, identity: impl Into<String>) -> Self {
        self.superclasses.insert(identity.into());
        self
    }

    #[must_use]
    pub fn with_relation(mut self, kind: RelationKind, target: impl Into<String>) -> Self {
        self.relations.entry(kind).or_default().insert(target.into());
        self
    }

    #[must_use]
    pub fn with_synonym(mut self, kind: SynonymKind, text: impl Into<String>) -> Self {
        self.synonyms.push(Synonym {
            kind,
            text: text.into(),
        });
        self
    }

    #[must_use]
    pub fn with_consider(mut self, identity: impl Into<String>) -> Self {
        self.consider = Some(identity.into());
        self
    }

    #[must_use]
    pub fn with_replaced_by(mut self, identity: impl Into<String>) -> Self {
        self.replaced_by = Some(identity.into());
        self
    }
}
