//! HTTP request handlers.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use witness_service::{Notifier, WitnessOutcome};
use witness_store::{CertificateProviderStore, RecordStore};
use witness_types::{RecordId, Role, Timestamp};
use witness_verification::{RoleStatus, SubmittedCode, TaskState, WitnessingRecord, WitnessingStage};

use crate::error::RpcError;
use crate::state::RpcState;

// ── Code entry ───────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct WitnessCodeForm {
    #[serde(rename = "witness-code", default)]
    pub witness_code: Option<String>,
}

/// Code entry for the role named in the path (`independent-witness` or
/// `certificate-provider`).
pub async fn witness_as_role<R, C, N>(
    State(state): State<RpcState<R, C, N>>,
    Path((id, role)): Path<(String, String)>,
    Form(form): Form<WitnessCodeForm>,
) -> Result<Redirect, RpcError>
where
    R: RecordStore + Send + Sync + 'static,
    C: CertificateProviderStore + Send + Sync + 'static,
    N: Notifier + 'static,
{
    let role = Role::from_slug(&role).ok_or(RpcError::UnknownRole(role))?;
    witness(&state, role, RecordId::new(id), form).await
}

async fn witness<R, C, N>(
    state: &RpcState<R, C, N>,
    role: Role,
    id: RecordId,
    form: WitnessCodeForm,
) -> Result<Redirect, RpcError>
where
    R: RecordStore + Send + Sync,
    C: CertificateProviderStore + Send + Sync,
    N: Notifier,
{
    let raw = form.witness_code.unwrap_or_default();
    let code_length = state.orchestrator.params().code_length;
    let code = SubmittedCode::parse(&raw, code_length)
        .map_err(|error| RpcError::Input { role, error })?;

    let now = state.clock.now();
    let outcome = state
        .orchestrator
        .witness(role, &id, &code, now)
        .await
        .map_err(|e| RpcError::from_submission(&id, e))?;

    match outcome {
        WitnessOutcome::Accepted(_) => Ok(Redirect::to(&next_page(role, &id))),
        WitnessOutcome::Rejected(rejection) => Err(RpcError::Rejected { role, rejection }),
    }
}

/// Where the browser goes after a role's code is accepted.
pub fn next_page(role: Role, id: &RecordId) -> String {
    match role {
        Role::IndependentWitness => {
            format!("/records/{id}/witnessing/{}", Role::CertificateProvider)
        }
        Role::CertificateProvider => format!("/records/{id}/submitted"),
    }
}

// ── Status ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct RoleStatusResponse {
    pub validated: bool,
    pub validated_at: Option<Timestamp>,
}

impl From<&RoleStatus> for RoleStatusResponse {
    fn from(status: &RoleStatus) -> Self {
        Self {
            validated: status.validated,
            validated_at: status.validated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WitnessingStatusResponse {
    pub id: RecordId,
    pub stage: WitnessingStage,
    pub independent_witness: RoleStatusResponse,
    pub certificate_provider: RoleStatusResponse,
    pub signed_at: Option<Timestamp>,
    pub submitted_at: Option<Timestamp>,
    pub sign_task: TaskState,
    pub attempts_remaining: Option<u32>,
}

impl From<&WitnessingRecord> for WitnessingStatusResponse {
    fn from(record: &WitnessingRecord) -> Self {
        Self {
            id: record.id.clone(),
            stage: record.stage(),
            independent_witness: (&record.independent_witness).into(),
            certificate_provider: (&record.certificate_provider).into(),
            signed_at: record.signed_at,
            submitted_at: record.submitted_at,
            sign_task: record.sign_task,
            attempts_remaining: record.witness_code_limiter.as_ref().map(|l| l.remaining()),
        }
    }
}

pub async fn witnessing_status<R, C, N>(
    State(state): State<RpcState<R, C, N>>,
    Path(id): Path<String>,
) -> Result<Json<WitnessingStatusResponse>, RpcError>
where
    R: RecordStore + Send + Sync + 'static,
    C: CertificateProviderStore + Send + Sync + 'static,
    N: Notifier + 'static,
{
    let id = RecordId::new(id);
    let record = state
        .orchestrator
        .record(&id)
        .map_err(|e| RpcError::from_submission(&id, e))?;
    Ok(Json((&record).into()))
}

// ── Counters ─────────────────────────────────────────────────────────────

pub async fn stats<R, C, N>(
    State(state): State<RpcState<R, C, N>>,
) -> Json<BTreeMap<&'static str, u64>>
where
    R: RecordStore + Send + Sync + 'static,
    C: CertificateProviderStore + Send + Sync + 'static,
    N: Notifier + 'static,
{
    Json(state.orchestrator.stats().snapshot().into_iter().collect())
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
