//! Concept identity parsing.
//!
//! EDAM identities look like `http://edamontology.org/data_0006`: the last
//! path segment is an axis token and a zero-padded number joined by `_`.

use std::fmt;

use serde::Serialize;

use crate::error::{Result, ValidatorError};

/// Numeric part of a concept identity.
pub type NumericId = u32;

/// The parsed trailing segment of a concept identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ConceptId {
    /// Top-level category token (`topic`, `data`, `operation`, `format`, ...).
    pub axis: String,
    /// Number after the axis token.
    pub number: NumericId,
}

impl ConceptId {
    /// Parse the `<axis>_<number>` segment after the last `/` of an identity.
    pub fn parse(identity: &str) -> Result<Self> {
        let invalid = |reason: &str| ValidatorError::InvalidIdentity {
            identity: identity.to_string(),
            reason: reason.to_string(),
        };

        let segment = identity.rsplit('/').next().unwrap_or(identity);
        let (axis, digits) = segment
            .split_once('_')
            .ok_or_else(|| invalid("missing '_' between axis and number"))?;

        if axis.is_empty() {
            return Err(invalid("empty axis"));
        }
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("number part is not numeric"));
        }
        let number = digits
            .parse::<NumericId>()
            .map_err(|err| invalid(&err.to_string()))?;

        Ok(Self {
            axis: axis.to_string(),
            number,
        })
    }
}

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{:04}", self.axis, self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_axis_and_number() {
        let id = ConceptId::parse("http://edamontology.org/data_0006").unwrap();
        assert_eq!(id.axis, "data");
        assert_eq!(id.number, 6);
        assert_eq!(id.to_string(), "data_0006");
    }

    #[test]
    fn keeps_wide_numbers() {
        let id = ConceptId::parse("http://edamontology.org/operation_12345").unwrap();
        assert_eq!(id.axis, "operation");
        assert_eq!(id.number, 12345);
    }

    #[test]
    fn rejects_malformed_segments() {
        for bad in [
            "http://edamontology.org/data",
            "http://edamontology.org/_0001",
            "http://edamontology.org/data_",
            "http://edamontology.org/data_12a",
            "http://edamontology.org/data_0001_2",
            "http://edamontology.org/",
        ] {
            let err = ConceptId::parse(bad).unwrap_err();
            assert!(
                matches!(err, ValidatorError::InvalidIdentity { .. }),
                "{bad} should be rejected"
            );
        }
    }
}
