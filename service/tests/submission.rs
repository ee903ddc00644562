//! End-to-end witnessing flows against nullable collaborators.

use std::sync::Arc;

use witness_nullables::{NullNotifier, NullRecordStore};
use witness_service::orchestrator::{STAT_ACCEPTED, STAT_CODE_EXPIRED, STAT_CODE_MISMATCH};
use witness_service::{NotificationKind, SubmissionError, SubmissionOrchestrator, WitnessOutcome};
use witness_store::{CertificateProviderStatus, StoreError};
use witness_types::{RecordId, Role, Timestamp, WitnessingParams};
use witness_verification::{
    Limiter, Rejection, SubmittedCode, TaskState, WitnessCode, WitnessingRecord,
    WitnessingStage,
};

type Orchestrator =
    SubmissionOrchestrator<Arc<NullRecordStore>, Arc<NullRecordStore>, Arc<NullNotifier>>;

const T0: u64 = 1_700_000_000;

struct Harness {
    store: Arc<NullRecordStore>,
    notifier: Arc<NullNotifier>,
    orchestrator: Orchestrator,
    id: RecordId,
}

impl Harness {
    fn with_notifier(notifier: NullNotifier) -> Self {
        let store = Arc::new(NullRecordStore::new());
        let notifier = Arc::new(notifier);
        let id = RecordId::new("lpa-id");

        let mut record = WitnessingRecord::new(id.clone());
        record
            .codes_mut(Role::IndependentWitness)
            .push(WitnessCode::new("4321", Timestamp::new(T0)));
        record
            .codes_mut(Role::CertificateProvider)
            .push(WitnessCode::new("1234", Timestamp::new(T0)));
        store.insert(record);

        let orchestrator = SubmissionOrchestrator::new(
            store.clone(),
            store.clone(),
            notifier.clone(),
            WitnessingParams::default(),
        );
        Self {
            store,
            notifier,
            orchestrator,
            id,
        }
    }

    fn new() -> Self {
        Self::with_notifier(NullNotifier::new())
    }

    fn confirm_certificate_provider_identity(&self) {
        self.store.insert_status(
            self.id.clone(),
            CertificateProviderStatus {
                identity_confirmed: true,
            },
        );
    }

    fn stored(&self) -> WitnessingRecord {
        self.store.record(&self.id).unwrap()
    }

    async fn attempt(
        &self,
        role: Role,
        raw: &str,
        at: u64,
    ) -> Result<WitnessOutcome, SubmissionError> {
        let code = SubmittedCode::parse(raw, 4).unwrap();
        self.orchestrator
            .witness(role, &self.id, &code, Timestamp::new(at))
            .await
    }
}

#[tokio::test]
async fn full_flow_submits_and_prompts_confirmed_certificate_provider() {
    let h = Harness::new();
    h.confirm_certificate_provider_identity();

    let iw = h.attempt(Role::IndependentWitness, "4321", T0 + 10).await.unwrap();
    assert_eq!(iw, WitnessOutcome::Accepted(WitnessingStage::IndependentWitnessed));
    assert!(h.notifier.sent().is_empty());

    let cp = h.attempt(Role::CertificateProvider, "1234", T0 + 20).await.unwrap();
    assert_eq!(cp, WitnessOutcome::Accepted(WitnessingStage::Submitted));

    let record = h.stored();
    assert_eq!(record.submitted_at, Some(Timestamp::new(T0 + 20)));
    assert_eq!(record.signed_at, Some(Timestamp::new(T0 + 20)));
    assert_eq!(record.sign_task, TaskState::Completed);
    assert!(record.witness_code_limiter.is_none());

    assert_eq!(
        h.notifier.sent(),
        vec![(NotificationKind::CertificateProviderPrompt, h.id.clone())]
    );
}

#[tokio::test]
async fn unconfirmed_certificate_provider_is_not_prompted() {
    let h = Harness::new();
    h.store
        .insert_status(h.id.clone(), CertificateProviderStatus::default());

    h.attempt(Role::IndependentWitness, "4321", T0).await.unwrap();
    h.attempt(Role::CertificateProvider, "1234", T0).await.unwrap();

    assert!(h.stored().submitted_at.is_some());
    assert!(h.notifier.sent().is_empty());
}

#[tokio::test]
async fn missing_certificate_provider_status_is_not_an_error() {
    let h = Harness::new();

    h.attempt(Role::IndependentWitness, "4321", T0).await.unwrap();
    let outcome = h.attempt(Role::CertificateProvider, "1234", T0).await.unwrap();

    assert_eq!(outcome, WitnessOutcome::Accepted(WitnessingStage::Submitted));
    assert!(h.notifier.sent().is_empty());
}

#[tokio::test]
async fn status_lookup_failure_surfaces_after_record_is_saved() {
    let h = Harness::new();
    h.attempt(Role::IndependentWitness, "4321", T0).await.unwrap();
    h.store.fail_status_lookups(true);

    let err = h
        .attempt(Role::CertificateProvider, "1234", T0)
        .await
        .unwrap_err();
    assert!(matches!(err, SubmissionError::Store(StoreError::Backend(_))));
    assert!(h.stored().submitted_at.is_some());
    assert!(h.notifier.sent().is_empty());
}

#[tokio::test]
async fn notifier_failure_is_reported_and_never_repeated() {
    let h = Harness::with_notifier(NullNotifier::failing());
    h.confirm_certificate_provider_identity();
    h.attempt(Role::IndependentWitness, "4321", T0).await.unwrap();

    let err = h
        .attempt(Role::CertificateProvider, "1234", T0)
        .await
        .unwrap_err();
    assert!(matches!(err, SubmissionError::Notify(_)));
    assert!(h.stored().submitted_at.is_some());

    let retry = h
        .attempt(Role::CertificateProvider, "1234", T0 + 1)
        .await
        .unwrap_err();
    assert!(matches!(retry, SubmissionError::AlreadySubmitted(_)));
    assert_eq!(h.notifier.sent().len(), 1);
}

#[tokio::test]
async fn certificate_provider_cannot_go_first() {
    let h = Harness::new();

    let err = h
        .attempt(Role::CertificateProvider, "1234", T0)
        .await
        .unwrap_err();
    assert!(matches!(err, SubmissionError::IndependentWitnessRequired));
    assert!(err.is_workflow());
    assert_eq!(h.store.put_count(), 0);
    assert!(h.stored().witness_code_limiter.is_none());
}

#[tokio::test]
async fn independent_witness_cannot_witness_twice() {
    let h = Harness::new();
    h.attempt(Role::IndependentWitness, "4321", T0).await.unwrap();

    let err = h
        .attempt(Role::IndependentWitness, "4321", T0 + 1)
        .await
        .unwrap_err();
    assert!(matches!(err, SubmissionError::IndependentWitnessAlreadyWitnessed));
}

#[tokio::test]
async fn rejections_are_persisted() {
    let h = Harness::new();

    let outcome = h.attempt(Role::IndependentWitness, "0000", T0).await.unwrap();
    assert_eq!(outcome, WitnessOutcome::Rejected(Rejection::CodeMismatch));
    assert_eq!(h.store.put_count(), 1);

    let limiter = h.stored().witness_code_limiter.unwrap();
    assert_eq!(limiter.remaining(), WitnessingParams::default().limiter_refill - 1);
    assert_eq!(h.stored().stage(), WitnessingStage::NotWitnessed);
}

#[tokio::test]
async fn expired_code_is_rejected_and_counted() {
    let h = Harness::new();
    let ttl = WitnessingParams::default().code_ttl_secs;

    let outcome = h
        .attempt(Role::IndependentWitness, "4321", T0 + ttl)
        .await
        .unwrap();
    assert_eq!(outcome, WitnessOutcome::Rejected(Rejection::CodeExpired));
    assert_eq!(h.orchestrator.stats().get(STAT_CODE_EXPIRED), 1);
}

#[tokio::test]
async fn budget_is_shared_and_exhausts() {
    let h = Harness::new();
    let refill = WitnessingParams::default().limiter_refill;

    for _ in 0..refill {
        let outcome = h.attempt(Role::IndependentWitness, "0000", T0).await.unwrap();
        assert_eq!(outcome, WitnessOutcome::Rejected(Rejection::CodeMismatch));
    }
    let blocked = h.attempt(Role::IndependentWitness, "4321", T0).await.unwrap();
    assert_eq!(blocked, WitnessOutcome::Rejected(Rejection::TooManyAttempts));
    assert_eq!(h.store.put_count(), refill as usize + 1);
    assert_eq!(h.stored().witness_code_limiter.unwrap().remaining(), 0);

    let window = WitnessingParams::default().limiter_window_secs;
    let later = h
        .attempt(Role::IndependentWitness, "4321", T0 + window)
        .await
        .unwrap();
    assert_eq!(later, WitnessOutcome::Accepted(WitnessingStage::IndependentWitnessed));
    assert_eq!(h.orchestrator.stats().get(STAT_CODE_MISMATCH), refill as u64);
    assert_eq!(h.orchestrator.stats().get(STAT_ACCEPTED), 1);
}

#[tokio::test]
async fn blocked_attempt_is_persisted_without_spending_budget() {
    let h = Harness::new();
    let now = Timestamp::new(T0);
    let mut record = h.stored();
    record.witness_code_limiter = Some(Limiter::new(60, 0, 10, now));
    h.store.insert(record);

    let outcome = h.attempt(Role::IndependentWitness, "4321", T0).await.unwrap();
    assert_eq!(outcome, WitnessOutcome::Rejected(Rejection::TooManyAttempts));
    assert_eq!(h.store.put_count(), 1);

    let stored = h.stored();
    assert!(!stored.independent_witness.validated);
    let limiter = stored.witness_code_limiter.unwrap();
    assert_eq!(limiter.remaining(), 0);
    assert_eq!(limiter.window_start(), now);

    // A zero refill never tops up, however long the wait.
    let later = h.attempt(Role::IndependentWitness, "4321", T0 + 600).await.unwrap();
    assert_eq!(later, WitnessOutcome::Rejected(Rejection::TooManyAttempts));
    assert_eq!(h.store.put_count(), 2);
    assert_eq!(h.stored().witness_code_limiter.unwrap().remaining(), 0);
}

#[tokio::test]
async fn court_of_protection_registration_leaves_sign_task_pending() {
    let h = Harness::new();
    let mut record = h.stored();
    record.registering_with_court_of_protection = true;
    h.store.insert(record);

    h.attempt(Role::IndependentWitness, "4321", T0).await.unwrap();
    h.attempt(Role::CertificateProvider, "1234", T0).await.unwrap();

    assert_eq!(h.stored().sign_task, TaskState::Pending);
}

#[tokio::test]
async fn store_put_failure_propagates() {
    let h = Harness::new();
    h.store.fail_puts(true);

    let err = h
        .attempt(Role::IndependentWitness, "4321", T0)
        .await
        .unwrap_err();
    assert!(matches!(err, SubmissionError::Store(_)));
    assert!(!err.is_workflow());
    assert!(!h.stored().independent_witness.validated);
}

#[tokio::test]
async fn unknown_record_is_not_found() {
    let h = Harness::new();
    let code = SubmittedCode::parse("4321", 4).unwrap();

    let err = h
        .orchestrator
        .witness(
            Role::IndependentWitness,
            &RecordId::new("missing"),
            &code,
            Timestamp::new(T0),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SubmissionError::Store(ref e) if e.is_not_found()));
}

#[tokio::test]
async fn submitted_record_rejects_further_attempts() {
    let h = Harness::new();
    h.attempt(Role::IndependentWitness, "4321", T0).await.unwrap();
    h.attempt(Role::CertificateProvider, "1234", T0).await.unwrap();

    let err = h
        .attempt(Role::IndependentWitness, "4321", T0)
        .await
        .unwrap_err();
    assert!(matches!(err, SubmissionError::AlreadySubmitted(_)));
}
