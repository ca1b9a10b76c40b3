//! Built-in consistency rules for EDAM documents.
//!
//! Rules are grouped by category:
//!
//! - **Identifier rules** (`identifier`): numeric id allocation
//! - **Structural rules** (`structural`): labels, self-reference, synonyms
//! - **Reference rules** (`reference`): deprecated or dangling targets
//! - **Lifecycle rules** (`lifecycle`): successors of deprecated concepts
//!
//! # Usage
//!
//! ```
//! use edam_validator::lint::rules::all_rules;
//! use edam_validator::lint::ValidationEngine;
//!
//! let mut engine = ValidationEngine::with_defaults();
//! for rule in all_rules() {
//!     engine.register(rule);
//! }
//! assert_eq!(engine.rules().len(), 11);
//! ```

pub mod identifier;
pub mod lifecycle;
pub mod reference;
pub mod structural;

use crate::error::{Result, ValidatorError};
use crate::lint::rule::BoxedRule;

pub use identifier::{IdRangeRule, IdReuseRule};
pub use lifecycle::{CrossAxisReplacementRule, ObsoleteConsiderRule, ObsoleteReplacedByRule};
pub use reference::{DeprecatedRelationTargetRule, DeprecatedSuperclassRule, UnresolvedReferenceRule};
pub use structural::{LabelFormatRule, SelfSuperclassRule, SynonymCollisionRule};

/// Rules reporting problems the legacy checker never looked for.
pub const EXTENDED_RULES: &[&str] = &["unresolved-reference"];

/// Returns the identifier rules.
pub fn identifier_rules() -> Vec<BoxedRule> {
    vec![Box::new(IdRangeRule), Box::new(IdReuseRule)]
}

/// Returns the lifecycle rules, dependency first.
pub fn lifecycle_rules() -> Vec<BoxedRule> {
    vec![
        Box::new(ObsoleteConsiderRule),
        Box::new(ObsoleteReplacedByRule),
        Box::new(CrossAxisReplacementRule),
    ]
}

/// Returns every built-in rule in evaluation order.
///
/// The order is fixed: findings of an earlier rule are always reported
/// before findings of a later one.
pub fn all_rules() -> Vec<BoxedRule> {
    let mut rules = identifier_rules();
    rules.push(Box::new(LabelFormatRule));
    rules.push(Box::new(DeprecatedRelationTargetRule));
    rules.push(Box::new(SelfSuperclassRule));
    rules.push(Box::new(DeprecatedSuperclassRule));
    rules.push(Box::new(SynonymCollisionRule));
    rules.extend(lifecycle_rules());
    rules.push(Box::new(UnresolvedReferenceRule));
    rules
}

/// Pick the named rules, plus whatever they depend on, in evaluation order.
///
/// Unknown ids are an error.
pub fn select<S: AsRef<str>>(ids: &[S]) -> Result<Vec<BoxedRule>> {
    let rules = all_rules();
    let mut wanted: Vec<String> = Vec::new();

    for id in ids {
        let id = id.as_ref();
        if !rules.iter().any(|rule| rule.id() == id) {
            return Err(ValidatorError::NotFound(format!("rule '{id}'")));
        }
        wanted.push(id.to_string());
    }

    // Dependencies only point backwards, so one reverse sweep closes the set.
    for rule in rules.iter().rev() {
        if wanted.iter().any(|id| id == rule.id()) {
            wanted.extend(rule.depends_on().iter().map(ToString::to_string));
        }
    }

    Ok(rules
        .into_iter()
        .filter(|rule| wanted.iter().any(|id| id == rule.id()))
        .collect())
}
