//! Submission orchestrator: runs the two role verifiers in order against a
//! stored record and finalises the record when both have passed.
//!
//! ```text
//! NotWitnessed --(independent witness accepted)--> IndependentWitnessed
//! IndependentWitnessed --(certificate provider accepted)--> Submitted
//! ```

use witness_store::{CertificateProviderStore, RecordStore, StoreError};
use witness_types::{RecordId, Role, Timestamp, WitnessingParams};
use witness_utils::StatsCounter;
use witness_verification::{
    Rejection, RoleVerifier, SubmittedCode, WitnessingRecord, WitnessingStage,
};

use crate::error::SubmissionError;
use crate::notify::{NotificationKind, Notifier};

pub const STAT_ACCEPTED: &str = "accepted";
pub const STAT_TOO_MANY_ATTEMPTS: &str = "too_many_attempts";
pub const STAT_CODE_MISMATCH: &str = "code_mismatch";
pub const STAT_CODE_EXPIRED: &str = "code_expired";

const STAT_NAMES: [&str; 4] = [
    STAT_ACCEPTED,
    STAT_TOO_MANY_ATTEMPTS,
    STAT_CODE_MISMATCH,
    STAT_CODE_EXPIRED,
];

/// Result of one well-formed witnessing attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WitnessOutcome {
    /// The code was accepted; the record is now at this stage.
    Accepted(WitnessingStage),
    /// The code was refused; the person can try again.
    Rejected(Rejection),
}

pub struct SubmissionOrchestrator<R, C, N> {
    records: R,
    certificate_providers: C,
    notifier: N,
    params: WitnessingParams,
    stats: StatsCounter,
}

impl<R, C, N> SubmissionOrchestrator<R, C, N>
where
    R: RecordStore,
    C: CertificateProviderStore,
    N: Notifier,
{
    pub fn new(records: R, certificate_providers: C, notifier: N, params: WitnessingParams) -> Self {
        Self {
            records,
            certificate_providers,
            notifier,
            params,
            stats: StatsCounter::new(&STAT_NAMES),
        }
    }

    pub fn params(&self) -> &WitnessingParams {
        &self.params
    }

    /// Attempt counters by outcome.
    pub fn stats(&self) -> &StatsCounter {
        &self.stats
    }

    /// Current state of a record.
    pub fn record(&self, id: &RecordId) -> Result<WitnessingRecord, SubmissionError> {
        Ok(self.records.get_record(id)?)
    }

    /// Dispatch to the step for `role`.
    pub async fn witness(
        &self,
        role: Role,
        id: &RecordId,
        code: &SubmittedCode,
        now: Timestamp,
    ) -> Result<WitnessOutcome, SubmissionError> {
        match role {
            Role::IndependentWitness => self.witness_as_independent_witness(id, code, now),
            Role::CertificateProvider => self.witness_as_certificate_provider(id, code, now).await,
        }
    }

    /// First step: the independent witness enters their code.
    pub fn witness_as_independent_witness(
        &self,
        id: &RecordId,
        code: &SubmittedCode,
        now: Timestamp,
    ) -> Result<WitnessOutcome, SubmissionError> {
        let mut record = self.records.get_record(id)?;
        if record.submitted_at.is_some() {
            return Err(SubmissionError::AlreadySubmitted(id.clone()));
        }
        if record.independent_witness.validated {
            return Err(SubmissionError::IndependentWitnessAlreadyWitnessed);
        }

        let result = RoleVerifier::new(Role::IndependentWitness).verify(
            &mut record,
            code,
            now,
            &self.params,
        );
        self.records.put_record(&record)?;

        Ok(self.outcome(id, Role::IndependentWitness, result, record.stage()))
    }

    /// Second step: the certificate provider enters their code.
    ///
    /// Acceptance signs and submits the record, saves it, and then notifies the
    /// certificate provider if they have already confirmed their identity. The
    /// record is saved before the notification, so a retried request after a
    /// notifier failure sees [`SubmissionError::AlreadySubmitted`] and the
    /// prompt is sent at most once.
    pub async fn witness_as_certificate_provider(
        &self,
        id: &RecordId,
        code: &SubmittedCode,
        now: Timestamp,
    ) -> Result<WitnessOutcome, SubmissionError> {
        let mut record = self.records.get_record(id)?;
        if record.submitted_at.is_some() {
            return Err(SubmissionError::AlreadySubmitted(id.clone()));
        }
        if !record.independent_witness.validated {
            return Err(SubmissionError::IndependentWitnessRequired);
        }

        let result = RoleVerifier::new(Role::CertificateProvider).verify(
            &mut record,
            code,
            now,
            &self.params,
        );
        if result.is_ok() {
            record.finalize(now);
        }
        self.records.put_record(&record)?;

        let outcome = self.outcome(id, Role::CertificateProvider, result, record.stage());
        if let WitnessOutcome::Accepted(_) = outcome {
            tracing::info!(record_id = %id, submitted_at = %now, "record submitted");
            self.prompt_certificate_provider(&record).await?;
        }
        Ok(outcome)
    }

    async fn prompt_certificate_provider(
        &self,
        record: &WitnessingRecord,
    ) -> Result<(), SubmissionError> {
        let identity_confirmed = match self.certificate_providers.get_status(&record.id) {
            Ok(status) => status.identity_confirmed,
            Err(StoreError::NotFound(_)) => false,
            Err(e) => return Err(e.into()),
        };
        if !identity_confirmed {
            return Ok(());
        }

        self.notifier
            .notify(NotificationKind::CertificateProviderPrompt, record)
            .await?;
        Ok(())
    }

    fn outcome(
        &self,
        id: &RecordId,
        role: Role,
        result: Result<(), Rejection>,
        stage: WitnessingStage,
    ) -> WitnessOutcome {
        match result {
            Ok(()) => {
                self.stats.increment(STAT_ACCEPTED);
                tracing::info!(record_id = %id, %role, "witness code accepted");
                WitnessOutcome::Accepted(stage)
            }
            Err(rejection) => {
                self.stats.increment(stat_name(rejection));
                match rejection {
                    Rejection::TooManyAttempts => {
                        tracing::warn!(record_id = %id, %role, "witness code attempts exhausted")
                    }
                    _ => tracing::info!(
                        record_id = %id,
                        %role,
                        reason = rejection.label(),
                        "witness code rejected"
                    ),
                }
                WitnessOutcome::Rejected(rejection)
            }
        }
    }
}

fn stat_name(rejection: Rejection) -> &'static str {
    match rejection {
        Rejection::TooManyAttempts => STAT_TOO_MANY_ATTEMPTS,
        Rejection::CodeMismatch => STAT_CODE_MISMATCH,
        Rejection::CodeExpired => STAT_CODE_EXPIRED,
    }
}
