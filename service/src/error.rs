use thiserror::Error;
use witness_store::StoreError;
use witness_types::RecordId;

/// Failures of a witnessing request.
///
/// Code rejections are not errors; see [`crate::WitnessOutcome`].
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("the independent witness must enter their code before the certificate provider")]
    IndependentWitnessRequired,

    /// The certificate provider has no counterpart: their acceptance submits
    /// the record, so a repeat hits [`SubmissionError::AlreadySubmitted`].
    #[error("the independent witness has already witnessed this record")]
    IndependentWitnessAlreadyWitnessed,

    #[error("record {0} has already been submitted")]
    AlreadySubmitted(RecordId),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("notify error: {0}")]
    Notify(#[from] NotifyError),
}

impl SubmissionError {
    /// Whether the caller broke the witnessing order, as opposed to a
    /// collaborator failing.
    pub fn is_workflow(&self) -> bool {
        matches!(
            self,
            Self::IndependentWitnessRequired | Self::IndependentWitnessAlreadyWitnessed | Self::AlreadySubmitted(_)
        )
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification transport error: {0}")]
    Transport(String),

    #[error("notification endpoint responded with status {0}")]
    Status(u16),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
