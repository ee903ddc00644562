//! Certificate provider status lookup.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use witness_types::RecordId;

/// What the certificate provider has done on their own side of the record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateProviderStatus {
    /// They have already confirmed their identity for this record.
    pub identity_confirmed: bool,
}

/// Trait for the certificate provider's own status, kept apart from the
/// witnessing record.
pub trait CertificateProviderStore {
    /// Returns [`StoreError::NotFound`] if the certificate provider has not
    /// started yet; callers treat that as "no status", not as a failure.
    fn get_status(&self, id: &RecordId) -> Result<CertificateProviderStatus, StoreError>;

    fn put_status(
        &self,
        id: &RecordId,
        status: &CertificateProviderStatus,
    ) -> Result<(), StoreError>;
}

impl<T: CertificateProviderStore + ?Sized> CertificateProviderStore for std::sync::Arc<T> {
    fn get_status(&self, id: &RecordId) -> Result<CertificateProviderStatus, StoreError> {
        (**self).get_status(id)
    }

    fn put_status(
        &self,
        id: &RecordId,
        status: &CertificateProviderStatus,
    ) -> Result<(), StoreError> {
        (**self).put_status(id, status)
    }
}
