//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::{Bytes, Str};
use heed::{Database, Env, EnvOpenOptions};

use crate::certificate_provider::LmdbCertificateProviderStore;
use crate::record::LmdbRecordStore;
use crate::LmdbError;

const RECORDS_DB: &str = "witnessing_records";
const CERTIFICATE_PROVIDERS_DB: &str = "certificate_providers";

/// Default map size: 256 MiB.
pub const DEFAULT_MAP_SIZE: usize = 256 * 1024 * 1024;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    records_db: Database<Str, Bytes>,
    certificate_providers_db: Database<Str, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    ///
    /// The directory is created if it does not exist.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per process for this path and
        // the memory map is never modified outside of LMDB.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(2)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let records_db = env.create_database(&mut wtxn, Some(RECORDS_DB))?;
        let certificate_providers_db =
            env.create_database(&mut wtxn, Some(CERTIFICATE_PROVIDERS_DB))?;
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), map_size, "opened LMDB environment");

        Ok(Self {
            env: Arc::new(env),
            records_db,
            certificate_providers_db,
        })
    }

    pub fn record_store(&self) -> LmdbRecordStore {
        LmdbRecordStore {
            env: Arc::clone(&self.env),
            records_db: self.records_db,
        }
    }

    pub fn certificate_provider_store(&self) -> LmdbCertificateProviderStore {
        LmdbCertificateProviderStore {
            env: Arc::clone(&self.env),
            certificate_providers_db: self.certificate_providers_db,
        }
    }
}
