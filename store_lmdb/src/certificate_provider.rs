//! LMDB implementation of CertificateProviderStore.

use std::sync::Arc;

use heed::types::{Bytes, Str};
use heed::{Database, Env};

use witness_store::{CertificateProviderStatus, CertificateProviderStore, StoreError};
use witness_types::RecordId;

use crate::LmdbError;

#[derive(Clone)]
pub struct LmdbCertificateProviderStore {
    pub(crate) env: Arc<Env>,
    pub(crate) certificate_providers_db: Database<Str, Bytes>,
}

impl CertificateProviderStore for LmdbCertificateProviderStore {
    fn get_status(&self, id: &RecordId) -> Result<CertificateProviderStatus, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let bytes = self
            .certificate_providers_db
            .get(&rtxn, id.as_str())
            .map_err(LmdbError::from)?
            .ok_or_else(|| LmdbError::NotFound(format!("certificate provider for '{id}'")))?;
        let status = bincode::deserialize(bytes).map_err(LmdbError::from)?;
        Ok(status)
    }

    fn put_status(
        &self,
        id: &RecordId,
        status: &CertificateProviderStatus,
    ) -> Result<(), StoreError> {
        let bytes = bincode::serialize(status).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.certificate_providers_db
            .put(&mut wtxn, id.as_str(), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
