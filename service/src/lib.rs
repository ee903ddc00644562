//! Witnessing submission service.
//!
//! Sequences the two role verifiers against a stored record:
//! - the independent witness's accepted code unlocks the certificate provider step;
//! - the certificate provider's accepted code signs and submits the record and,
//!   when the certificate provider has already confirmed their identity, sends
//!   them a prompt to provide their certificate.
//!
//! Every attempt is persisted whatever its outcome.

pub mod config;
pub mod error;
pub mod notify;
pub mod orchestrator;

pub use config::ServiceConfig;
pub use error::{NotifyError, ServiceError, SubmissionError};
pub use notify::{AnyNotifier, LogNotifier, NotificationKind, Notifier, WebhookNotifier};
pub use orchestrator::{SubmissionOrchestrator, WitnessOutcome};
