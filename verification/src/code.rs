//! Issued witness codes.
//!
//! Codes are created and delivered elsewhere; this module only matches a
//! submitted value against what was issued and decides whether it is still
//! fresh. Re-issuing a code does not invalidate earlier ones.

use serde::{Deserialize, Serialize};
use witness_types::Timestamp;

/// One issued code. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessCode {
    pub code: String,
    pub created: Timestamp,
}

impl WitnessCode {
    pub fn new(code: impl Into<String>, created: Timestamp) -> Self {
        Self {
            code: code.into(),
            created,
        }
    }

    /// Expired once `ttl_secs` have passed since issue.
    pub fn has_expired(&self, now: Timestamp, ttl_secs: u64) -> bool {
        self.created.has_expired(ttl_secs, now)
    }
}

/// Every code issued to one role, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WitnessCodes(Vec<WitnessCode>);

impl WitnessCodes {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Record a newly issued code.
    pub fn push(&mut self, code: WitnessCode) {
        self.0.push(code);
    }

    /// Exact, case-sensitive lookup.
    ///
    /// When the same value was issued more than once the most recent issue
    /// wins, so an older expired copy cannot shadow a fresh one.
    pub fn find(&self, value: &str) -> Option<&WitnessCode> {
        self.0.iter().rev().find(|c| c.code == value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<WitnessCode> for WitnessCodes {
    fn from_iter<I: IntoIterator<Item = WitnessCode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
