//! The two witnessing roles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A person who must type back a code sent to them before the document
/// counts as witnessed.
///
/// The independent witness always goes first; the certificate provider's
/// successful entry submits the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    IndependentWitness,
    CertificateProvider,
}

impl Role {
    /// URL-safe name, also used as a structured log field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IndependentWitness => "independent-witness",
            Self::CertificateProvider => "certificate-provider",
        }
    }

    /// Parse the URL-safe name produced by [`Role::as_str`].
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "independent-witness" => Some(Self::IndependentWitness),
            "certificate-provider" => Some(Self::CertificateProvider),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_round_trips() {
        for role in [Role::IndependentWitness, Role::CertificateProvider] {
            assert_eq!(Role::from_slug(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_slug("donor"), None);
    }
}
