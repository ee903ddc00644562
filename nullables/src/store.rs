//! Nullable store: thread-safe in-memory storage for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use witness_store::{CertificateProviderStatus, CertificateProviderStore, RecordStore, StoreError};
use witness_types::RecordId;
use witness_verification::WitnessingRecord;

/// An in-memory record + certificate provider store for testing.
/// Thread-safe for use with tokio's multi-threaded runtime.
pub struct NullRecordStore {
    records: Mutex<HashMap<RecordId, WitnessingRecord>>,
    certificate_providers: Mutex<HashMap<RecordId, CertificateProviderStatus>>,
    put_count: AtomicUsize,
    fail_puts: AtomicBool,
    fail_status_lookups: AtomicBool,
}

impl NullRecordStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            certificate_providers: Mutex::new(HashMap::new()),
            put_count: AtomicUsize::new(0),
            fail_puts: AtomicBool::new(false),
            fail_status_lookups: AtomicBool::new(false),
        }
    }

    /// Seed a record without counting it as a save.
    pub fn insert(&self, record: WitnessingRecord) {
        self.records
            .lock()
            .unwrap()
            .insert(record.id.clone(), record);
    }

    /// Seed a certificate provider status.
    pub fn insert_status(&self, id: RecordId, status: CertificateProviderStatus) {
        self.certificate_providers.lock().unwrap().insert(id, status);
    }

    /// Snapshot of a stored record, if any.
    pub fn record(&self, id: &RecordId) -> Option<WitnessingRecord> {
        self.records.lock().unwrap().get(id).cloned()
    }

    /// Number of successful `put_record` calls.
    pub fn put_count(&self) -> usize {
        self.put_count.load(Ordering::SeqCst)
    }

    /// Make every subsequent `put_record` fail with a backend error.
    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `get_status` fail with a backend error.
    pub fn fail_status_lookups(&self, fail: bool) {
        self.fail_status_lookups.store(fail, Ordering::SeqCst);
    }
}

impl Default for NullRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for NullRecordStore {
    fn get_record(&self, id: &RecordId) -> Result<WitnessingRecord, StoreError> {
        self.records
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn put_record(&self, record: &WitnessingRecord) -> Result<(), StoreError> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected put failure".into()));
        }
        self.records
            .lock()
            .unwrap()
            .insert(record.id.clone(), record.clone());
        self.put_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl CertificateProviderStore for NullRecordStore {
    fn get_status(&self, id: &RecordId) -> Result<CertificateProviderStatus, StoreError> {
        if self.fail_status_lookups.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected lookup failure".into()));
        }
        self.certificate_providers
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn put_status(
        &self,
        id: &RecordId,
        status: &CertificateProviderStatus,
    ) -> Result<(), StoreError> {
        self.insert_status(id.clone(), status.clone());
        Ok(())
    }
}
