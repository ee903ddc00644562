//! Validation of the submitted code field.
//!
//! Runs before any verification so malformed input never spends an attempt.

use witness_types::Role;

use crate::error::InputError;

/// Name of the form field carrying the code.
pub const WITNESS_CODE_FIELD: &str = "witness-code";

/// Message key naming the field in errors, per role.
pub fn field_label(role: Role) -> &'static str {
    match role {
        Role::IndependentWitness => "theCodeWeSentIndependentWitness",
        Role::CertificateProvider => "theCodeWeSentCertificateProvider",
    }
}

/// A code that passed input validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmittedCode(String);

impl SubmittedCode {
    /// Trim surrounding whitespace, then require exactly `expected_length`
    /// characters.
    pub fn parse(raw: &str, expected_length: usize) -> Result<Self, InputError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InputError::Missing);
        }
        if trimmed.chars().count() != expected_length {
            return Err(InputError::WrongLength {
                expected: expected_length,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_numeric() {
        assert_eq!(SubmittedCode::parse("1234", 4).unwrap().as_str(), "1234");
    }

    #[test]
    fn valid_alpha_keeps_case() {
        assert_eq!(SubmittedCode::parse("aBcD", 4).unwrap().as_str(), "aBcD");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(SubmittedCode::parse("  1234\n", 4).unwrap().as_str(), "1234");
    }

    #[test]
    fn missing() {
        assert_eq!(SubmittedCode::parse("", 4), Err(InputError::Missing));
        assert_eq!(SubmittedCode::parse("   ", 4), Err(InputError::Missing));
    }

    #[test]
    fn too_long() {
        assert_eq!(
            SubmittedCode::parse("12345", 4),
            Err(InputError::WrongLength { expected: 4 })
        );
    }

    #[test]
    fn too_short() {
        assert_eq!(
            SubmittedCode::parse("123", 4),
            Err(InputError::WrongLength { expected: 4 })
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(SubmittedCode::parse("éééé", 4).is_ok());
    }

    #[test]
    fn labels_differ_per_role() {
        assert_ne!(
            field_label(Role::IndependentWitness),
            field_label(Role::CertificateProvider)
        );
    }
}
