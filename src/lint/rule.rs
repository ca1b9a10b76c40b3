//! Validation rule trait.

use crate::ontology::Concept;

use super::config::ValidationContext;
use super::diagnostic::{Finding, RuleCategory, Severity};

/// A consistency rule evaluated once per concept.
///
/// Rules are stateless and pure: everything they read comes from the
/// `ValidationContext`, and everything they report is returned.
pub trait ValidationRule: Send + Sync {
    /// Unique identifier for this rule (e.g., "id-range")
    fn id(&self) -> &str;

    /// Human-readable name
    fn name(&self) -> &str;

    /// Detailed description of what this rule checks
    fn description(&self) -> &str;

    /// Category this rule belongs to
    fn category(&self) -> RuleCategory;

    /// Default severity level
    fn default_severity(&self) -> Severity;

    /// Rules whose resolution this rule builds on. A rule only runs when
    /// all of its dependencies are registered and enabled.
    fn depends_on(&self) -> &[&str] {
        &[]
    }

    /// Check one concept
    fn validate(&self, ctx: &ValidationContext<'_>, concept: &Concept) -> Vec<Finding>;
}

/// A boxed validation rule for dynamic dispatch
pub type BoxedRule = Box<dyn ValidationRule>;

/// Helper macro for single-condition rules
#[macro_export]
macro_rules! impl_rule {
    (
        $struct_name:ident,
        id: $id:expr,
        name: $name:expr,
        description: $desc:expr,
        category: $cat:expr,
        severity: $sev:expr,
        validate: |$ctx:ident, $concept:ident| $validate_body:expr
    ) => {
        pub struct $struct_name;

        impl $crate::lint::rule::ValidationRule for $struct_name {
            fn id(&self) -> &str {
                $id
            }

            fn name(&self) -> &str {
                $name
            }

            fn description(&self) -> &str {
                $desc
            }

            fn category(&self) -> $crate::lint::diagnostic::RuleCategory {
                $cat
            }

            fn default_severity(&self) -> $crate::lint::diagnostic::Severity {
                $sev
            }

            fn validate(
                &self,
                $ctx: &$crate::lint::config::ValidationContext<'_>,
                $concept: &$crate::ontology::Concept,
            ) -> Vec<$crate::lint::diagnostic::Finding> {
                $validate_body
            }
        }
    };
}

pub use impl_rule;
