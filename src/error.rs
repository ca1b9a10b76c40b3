//! Error types for edam-validator.
//!
//! Everything here is a structural failure: it aborts the run before or
//! outside rule evaluation. Rule violations are never errors, they are
//! [`Finding`](crate::lint::Finding)s.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("read {path}: {source}")]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML at byte {position}: {message}")]
    Xml { position: usize, message: String },

    #[error("document has no next_id")]
    MissingNextId,

    #[error("invalid next_id {0:?}")]
    InvalidNextId(String),

    #[error("invalid concept identity {identity:?}: {reason}")]
    InvalidIdentity { identity: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

pub type Result<T> = std::result::Result<T, ValidatorError>;

impl ValidatorError {
    /// Whether the error was raised while turning the document into a graph.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::ReadDocument { .. }
                | Self::Xml { .. }
                | Self::MissingNextId
                | Self::InvalidNextId(_)
                | Self::InvalidIdentity { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_errors_are_classified() {
        assert!(ValidatorError::MissingNextId.is_structural());
        assert!(
            ValidatorError::InvalidIdentity {
                identity: "x".into(),
                reason: "no axis".into()
            }
            .is_structural()
        );
        assert!(!ValidatorError::Config("bad".into()).is_structural());
        assert!(!ValidatorError::ValidationFailed("1 error(s)".into()).is_structural());
    }

    #[test]
    fn messages_name_the_offender() {
        let err = ValidatorError::InvalidIdentity {
            identity: "http://edamontology.org/data".into(),
            reason: "missing '_'".into(),
        };
        let text = err.to_string();
        assert!(text.contains("http://edamontology.org/data"));
        assert!(text.contains("missing '_'"));
    }
}
