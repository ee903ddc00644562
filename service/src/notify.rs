//! Outbound notifications.
//!
//! Fire-and-check: a failed send is returned to the caller and never retried
//! here.

use std::future::Future;

use serde::Serialize;
use witness_verification::WitnessingRecord;

use crate::error::NotifyError;

/// Which message to send.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    /// Asks a certificate provider who has already confirmed their identity to
    /// come back and provide their certificate, now that the record is submitted.
    CertificateProviderPrompt,
}

pub trait Notifier: Send + Sync {
    fn notify(
        &self,
        kind: NotificationKind,
        record: &WitnessingRecord,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

impl<T: Notifier + ?Sized> Notifier for std::sync::Arc<T> {
    fn notify(
        &self,
        kind: NotificationKind,
        record: &WitnessingRecord,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send {
        (**self).notify(kind, record)
    }
}

/// Writes notifications to the log instead of sending them.
#[derive(Clone, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    async fn notify(
        &self,
        kind: NotificationKind,
        record: &WitnessingRecord,
    ) -> Result<(), NotifyError> {
        tracing::info!(record_id = %record.id, ?kind, "notification (log only)");
        Ok(())
    }
}

#[derive(Serialize)]
struct NotificationPayload<'a> {
    kind: NotificationKind,
    record_id: &'a str,
    submitted_at: Option<u64>,
}

/// POSTs a JSON payload to a configured endpoint.
#[derive(Clone, Debug)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Notifier for WebhookNotifier {
    async fn notify(
        &self,
        kind: NotificationKind,
        record: &WitnessingRecord,
    ) -> Result<(), NotifyError> {
        let payload = NotificationPayload {
            kind,
            record_id: record.id.as_str(),
            submitted_at: record.submitted_at.map(|t| t.as_secs()),
        };
        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }
        tracing::debug!(record_id = %record.id, ?kind, "notification sent");
        Ok(())
    }
}

/// The notifier chosen by configuration.
#[derive(Clone, Debug)]
pub enum AnyNotifier {
    Log(LogNotifier),
    Webhook(WebhookNotifier),
}

impl AnyNotifier {
    /// A webhook notifier when a URL is configured, otherwise log only.
    pub fn from_url(url: Option<&str>) -> Self {
        match url {
            Some(url) => Self::Webhook(WebhookNotifier::new(url)),
            None => Self::Log(LogNotifier),
        }
    }
}

impl Notifier for AnyNotifier {
    async fn notify(
        &self,
        kind: NotificationKind,
        record: &WitnessingRecord,
    ) -> Result<(), NotifyError> {
        match self {
            Self::Log(n) => n.notify(kind, record).await,
            Self::Webhook(n) => n.notify(kind, record).await,
        }
    }
}
