//! Finding types produced by consistency rules.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ontology::Concept;

/// Placeholder shown for a target without `rdfs:label`.
pub const NO_LABEL: &str = "no label";

/// Category of validation rule
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    /// Numeric id allocation (range, reuse)
    Identifier,
    /// Shape of a single concept (labels, superclasses, synonyms)
    Structure,
    /// Integrity of references to other concepts
    Reference,
    /// Deprecation bookkeeping (consider, replacedBy)
    Lifecycle,
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier => write!(f, "identifier"),
            Self::Structure => write!(f, "structure"),
            Self::Reference => write!(f, "reference"),
            Self::Lifecycle => write!(f, "lifecycle"),
        }
    }
}

/// Severity level for findings
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported, never fails the run
    Warning,
    /// Fails the run
    Error,
}

impl Severity {
    /// Capitalised label used at the start of a rendered finding.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A concept as it appears in a finding.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct ConceptRef {
    pub identity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ConceptRef {
    /// Reference to an identity that is not in the graph.
    pub fn unresolved(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            label: None,
        }
    }

    /// Label, or [`NO_LABEL`] when there is none.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(NO_LABEL)
    }
}

impl From<&Concept> for ConceptRef {
    fn from(concept: &Concept) -> Self {
        Self {
            identity: concept.identity.clone(),
            label: concept.label().map(str::to_string),
        }
    }
}

/// One rule violation.
///
/// `targets` is never empty: constructors take the first target and
/// [`Finding::with_targets`] only appends.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Finding {
    /// The rule ID that generated this finding
    pub rule_id: String,
    pub severity: Severity,
    pub category: RuleCategory,
    pub message: String,
    pub source: ConceptRef,
    pub(crate) targets: Vec<ConceptRef>,
}

impl Finding {
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        source: &Concept,
        target: impl Into<ConceptRef>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            category: RuleCategory::Structure,
            message: message.into(),
            source: source.into(),
            targets: vec![target.into()],
        }
    }

    /// Create an error finding
    pub fn error(
        rule_id: impl Into<String>,
        message: impl Into<String>,
        source: &Concept,
        target: impl Into<ConceptRef>,
    ) -> Self {
        Self::new(rule_id, Severity::Error, message, source, target)
    }

    /// Create a warning finding
    pub fn warning(
        rule_id: impl Into<String>,
        message: impl Into<String>,
        source: &Concept,
        target: impl Into<ConceptRef>,
    ) -> Self {
        Self::new(rule_id, Severity::Warning, message, source, target)
    }

    /// Append further targets after the first.
    #[must_use]
    pub fn with_targets<I, T>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ConceptRef>,
    {
        self.targets.extend(targets.into_iter().map(Into::into));
        self
    }

    /// Set the category
    #[must_use]
    pub const fn with_category(mut self, category: RuleCategory) -> Self {
        self.category = category;
        self
    }

    /// Every target, primary first.
    #[must_use]
    pub fn targets(&self) -> &[ConceptRef] {
        &self.targets
    }

    /// The target named in the rendered line.
    #[must_use]
    pub fn primary_target(&self) -> &ConceptRef {
        &self.targets[0]
    }

    /// The report line after the severity label.
    #[must_use]
    pub const fn detail(&self) -> FindingDetail<'_> {
        FindingDetail(self)
    }
}

/// `<message> - '<source label>' (<source>) -> '<target label>' (<target>)`
pub struct FindingDetail<'a>(&'a Finding);

impl fmt::Display for FindingDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let finding = self.0;
        let target = finding.primary_target();
        write!(
            f,
            "{} - '{}' ({}) -> '{}' ({})",
            finding.message,
            finding.source.label.as_deref().unwrap_or_default(),
            finding.source.identity,
            target.display_label(),
            target.identity
        )
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity.label(), self.detail())
    }
}
