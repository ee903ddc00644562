//! RPC error types and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use witness_service::SubmissionError;
use witness_types::{RecordId, Role};
use witness_verification::{field_label, InputError, Rejection, WITNESS_CODE_FIELD};

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("invalid {role} code: {error}")]
    Input { role: Role, error: InputError },

    #[error("{role} code rejected: {rejection}")]
    Rejected { role: Role, rejection: Rejection },

    #[error("record not found: {0}")]
    RecordNotFound(RecordId),

    #[error("unknown witnessing role: {0}")]
    UnknownRole(String),

    #[error("{0}")]
    Conflict(String),

    #[error("server error: {0}")]
    Server(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl RpcError {
    /// Map a submission failure for `id`.
    pub fn from_submission(id: &RecordId, err: SubmissionError) -> Self {
        match err {
            SubmissionError::Store(ref e) if e.is_not_found() => Self::RecordNotFound(id.clone()),
            e if e.is_workflow() => Self::Conflict(e.to_string()),
            e => Self::Internal(e.to_string()),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Input { .. } | Self::Rejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::RecordNotFound(_) | Self::UnknownRole(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Server(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error shown against the code field.
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub error: &'static str,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
}

#[derive(Debug, Serialize)]
struct MessageBody {
    error: String,
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::Input { role, error } => {
                let length = match error {
                    InputError::WrongLength { expected } => Some(expected),
                    InputError::Missing => None,
                };
                let body = FieldError {
                    field: WITNESS_CODE_FIELD,
                    error: field_label(role),
                    kind: error.kind(),
                    length,
                };
                (status, Json(body)).into_response()
            }
            Self::Rejected { rejection, .. } => {
                let body = FieldError {
                    field: WITNESS_CODE_FIELD,
                    error: rejection.label(),
                    kind: "custom",
                    length: None,
                };
                (status, Json(body)).into_response()
            }
            Self::RecordNotFound(_) | Self::UnknownRole(_) | Self::Conflict(_) => {
                let body = MessageBody {
                    error: self.to_string(),
                };
                (status, Json(body)).into_response()
            }
            // Never expose collaborator details.
            Self::Server(_) | Self::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                let body = MessageBody {
                    error: "internal server error".into(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
