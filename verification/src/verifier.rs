//! Per-role code verification.
//!
//! One algorithm serves both roles; the role only selects which code set and
//! status on the record are used. Ordering between the roles is the caller's
//! concern.

use witness_types::{Role, Timestamp, WitnessingParams};

use crate::error::Rejection;
use crate::form::SubmittedCode;
use crate::limiter::Limiter;
use crate::record::WitnessingRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleVerifier {
    role: Role,
}

impl RoleVerifier {
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    /// Check a submitted code against this role's issued codes.
    ///
    /// The shared limiter is consulted first; when it refuses, no comparison
    /// happens at all. On success the limiter is dropped so whatever comes next
    /// starts with a fresh budget, and the role is marked validated.
    ///
    /// The record is mutated in every case and must be persisted by the caller
    /// whatever the result.
    pub fn verify(
        &self,
        record: &mut WitnessingRecord,
        code: &SubmittedCode,
        now: Timestamp,
        params: &WitnessingParams,
    ) -> Result<(), Rejection> {
        let limiter = record
            .witness_code_limiter
            .get_or_insert_with(|| Limiter::from_params(params, now));
        if !limiter.allow(now) {
            return Err(Rejection::TooManyAttempts);
        }

        let expired = match record.codes(self.role).find(code.as_str()) {
            Some(found) => found.has_expired(now, params.code_ttl_secs),
            None => return Err(Rejection::CodeMismatch),
        };
        if expired {
            return Err(Rejection::CodeExpired);
        }

        record.witness_code_limiter = None;
        record.status_mut(self.role).mark_validated(now);
        Ok(())
    }
}
