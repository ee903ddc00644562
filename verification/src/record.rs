//! The witnessing record aggregate.
//!
//! One record holds both roles' issued codes, the shared attempt limiter and
//! the witnessing timestamps. It is loaded, changed and saved as a whole.

use serde::{Deserialize, Serialize};
use witness_types::{RecordId, Role, Timestamp};

use crate::code::WitnessCodes;
use crate::limiter::Limiter;

/// Whether one role has typed back a valid code.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleStatus {
    pub validated: bool,
    pub validated_at: Option<Timestamp>,
}

impl RoleStatus {
    pub fn mark_validated(&mut self, now: Timestamp) {
        self.validated = true;
        self.validated_at = Some(now);
    }
}

/// Progress of the "confirm your identity and sign" task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    #[default]
    NotStarted,
    InProgress,
    /// Signed, but completion waits on an external decision.
    Pending,
    Completed,
}

/// Where a record is in the witnessing flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WitnessingStage {
    NotWitnessed,
    IndependentWitnessed,
    /// Terminal.
    Submitted,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessingRecord {
    pub id: RecordId,
    pub independent_witness_codes: WitnessCodes,
    pub certificate_provider_codes: WitnessCodes,
    /// Absent until the first attempt, and again after any role validates.
    pub witness_code_limiter: Option<Limiter>,
    pub independent_witness: RoleStatus,
    pub certificate_provider: RoleStatus,
    pub signed_at: Option<Timestamp>,
    pub submitted_at: Option<Timestamp>,
    pub sign_task: TaskState,
    pub registering_with_court_of_protection: bool,
}

impl WitnessingRecord {
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            independent_witness_codes: WitnessCodes::new(),
            certificate_provider_codes: WitnessCodes::new(),
            witness_code_limiter: None,
            independent_witness: RoleStatus::default(),
            certificate_provider: RoleStatus::default(),
            signed_at: None,
            submitted_at: None,
            sign_task: TaskState::default(),
            registering_with_court_of_protection: false,
        }
    }

    pub fn codes(&self, role: Role) -> &WitnessCodes {
        match role {
            Role::IndependentWitness => &self.independent_witness_codes,
            Role::CertificateProvider => &self.certificate_provider_codes,
        }
    }

    pub fn codes_mut(&mut self, role: Role) -> &mut WitnessCodes {
        match role {
            Role::IndependentWitness => &mut self.independent_witness_codes,
            Role::CertificateProvider => &mut self.certificate_provider_codes,
        }
    }

    pub fn status(&self, role: Role) -> &RoleStatus {
        match role {
            Role::IndependentWitness => &self.independent_witness,
            Role::CertificateProvider => &self.certificate_provider,
        }
    }

    pub fn status_mut(&mut self, role: Role) -> &mut RoleStatus {
        match role {
            Role::IndependentWitness => &mut self.independent_witness,
            Role::CertificateProvider => &mut self.certificate_provider,
        }
    }

    pub fn stage(&self) -> WitnessingStage {
        if self.submitted_at.is_some() {
            WitnessingStage::Submitted
        } else if self.independent_witness.validated {
            WitnessingStage::IndependentWitnessed
        } else {
            WitnessingStage::NotWitnessed
        }
    }

    /// Stamp the record as signed and submitted.
    ///
    /// Only valid once both roles have validated; returns `false` and leaves
    /// the record untouched otherwise.
    pub fn finalize(&mut self, now: Timestamp) -> bool {
        if !(self.independent_witness.validated && self.certificate_provider.validated) {
            return false;
        }
        self.signed_at = Some(now);
        self.submitted_at = Some(now);
        self.sign_task = if self.registering_with_court_of_protection {
            TaskState::Pending
        } else {
            TaskState::Completed
        };
        true
    }
}
