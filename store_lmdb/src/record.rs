//! LMDB implementation of RecordStore.

use std::sync::Arc;

use heed::types::{Bytes, Str};
use heed::{Database, Env};

use witness_store::{RecordStore, StoreError};
use witness_types::RecordId;
use witness_verification::WitnessingRecord;

use crate::LmdbError;

#[derive(Clone)]
pub struct LmdbRecordStore {
    pub(crate) env: Arc<Env>,
    pub(crate) records_db: Database<Str, Bytes>,
}

impl RecordStore for LmdbRecordStore {
    fn get_record(&self, id: &RecordId) -> Result<WitnessingRecord, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let bytes = self
            .records_db
            .get(&rtxn, id.as_str())
            .map_err(LmdbError::from)?
            .ok_or_else(|| LmdbError::NotFound(format!("record '{id}'")))?;
        let record = bincode::deserialize(bytes).map_err(LmdbError::from)?;
        Ok(record)
    }

    fn put_record(&self, record: &WitnessingRecord) -> Result<(), StoreError> {
        let bytes = bincode::serialize(record).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.records_db
            .put(&mut wtxn, record.id.as_str(), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LmdbEnvironment;
    use witness_types::{Role, Timestamp};
    use witness_verification::{Limiter, WitnessCode};

    fn temp_env() -> (tempfile::TempDir, LmdbEnvironment) {
        let dir = tempfile::tempdir().expect("temp dir");
        let env = LmdbEnvironment::open(dir.path(), 16 * 1024 * 1024).expect("open env");
        (dir, env)
    }

    #[test]
    fn missing_record_is_not_found() {
        let (_dir, env) = temp_env();
        let err = env
            .record_store()
            .get_record(&RecordId::new("nope"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn put_then_get_preserves_limiter_and_codes() {
        let (_dir, env) = temp_env();
        let store = env.record_store();

        let now = Timestamp::new(1_700_000_000);
        let mut record = WitnessingRecord::new(RecordId::new("lpa-id"));
        record
            .codes_mut(Role::CertificateProvider)
            .push(WitnessCode::new("1234", now));
        let mut limiter = Limiter::new(60, 5, 10, now);
        assert!(limiter.allow(now));
        record.witness_code_limiter = Some(limiter);

        store.put_record(&record).unwrap();
        let loaded = store.get_record(&record.id).unwrap();

        assert_eq!(loaded, record);
        assert_eq!(loaded.witness_code_limiter.unwrap().remaining(), 4);
    }

    #[test]
    fn put_overwrites_previous_version() {
        let (_dir, env) = temp_env();
        let store = env.record_store();
        let mut record = WitnessingRecord::new(RecordId::new("lpa-id"));
        store.put_record(&record).unwrap();

        record
            .status_mut(Role::IndependentWitness)
            .mark_validated(Timestamp::new(5));
        store.put_record(&record).unwrap();

        assert!(store.get_record(&record.id).unwrap().independent_witness.validated);
    }

    #[test]
    fn records_survive_reopening_the_environment() {
        let dir = tempfile::tempdir().expect("temp dir");
        let record = WitnessingRecord::new(RecordId::new("lpa-id"));
        {
            let env = LmdbEnvironment::open(dir.path(), 16 * 1024 * 1024).unwrap();
            env.record_store().put_record(&record).unwrap();
        }
        let env = LmdbEnvironment::open(dir.path(), 16 * 1024 * 1024).unwrap();
        assert_eq!(env.record_store().get_record(&record.id).unwrap(), record);
    }
}
