//! Witnessing record storage trait.

use crate::StoreError;
use witness_types::RecordId;
use witness_verification::WitnessingRecord;

/// Load and save whole witnessing records.
///
/// Called after every verification attempt, successful or not, so consumed
/// attempts survive restarts.
pub trait RecordStore {
    /// Fetch a record. Returns [`StoreError::NotFound`] for an unknown id.
    fn get_record(&self, id: &RecordId) -> Result<WitnessingRecord, StoreError>;

    /// Insert or overwrite a record, keyed by its own id.
    fn put_record(&self, record: &WitnessingRecord) -> Result<(), StoreError>;
}

impl<T: RecordStore + ?Sized> RecordStore for std::sync::Arc<T> {
    fn get_record(&self, id: &RecordId) -> Result<WitnessingRecord, StoreError> {
        (**self).get_record(id)
    }

    fn put_record(&self, record: &WitnessingRecord) -> Result<(), StoreError> {
        (**self).put_record(record)
    }
}
