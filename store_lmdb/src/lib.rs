//! LMDB storage backend for witness-code verification.
//!
//! Implements the storage traits from `witness-store` using the `heed` LMDB
//! bindings. Each logical store maps to one LMDB database within a single
//! environment; values are `bincode`-encoded.

pub mod certificate_provider;
pub mod environment;
pub mod error;
pub mod record;

pub use certificate_provider::LmdbCertificateProviderStore;
pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use record::LmdbRecordStore;
