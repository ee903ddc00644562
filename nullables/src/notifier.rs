//! Nullable notifier: record notifications without sending them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use witness_service::{NotificationKind, Notifier, NotifyError};
use witness_types::RecordId;
use witness_verification::WitnessingRecord;

/// A notifier that records what it was asked to send.
#[derive(Default)]
pub struct NullNotifier {
    sent: Mutex<Vec<(NotificationKind, RecordId)>>,
    fail: AtomicBool,
}

impl NullNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every send fails.
    pub fn failing() -> Self {
        let notifier = Self::new();
        notifier.fail.store(true, Ordering::SeqCst);
        notifier
    }

    /// All notifications "sent" so far, including failed ones.
    pub fn sent(&self) -> Vec<(NotificationKind, RecordId)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for NullNotifier {
    async fn notify(
        &self,
        kind: NotificationKind,
        record: &WitnessingRecord,
    ) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push((kind, record.id.clone()));
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotifyError::Status(503));
        }
        Ok(())
    }
}
