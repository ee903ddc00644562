//! Abstract storage traits for witness-code verification.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The rest of the codebase depends only on the traits.
//!
//! No conditional writes are offered: two concurrent attempts against the same
//! record race and the last save wins.

pub mod certificate_provider;
pub mod error;
pub mod record;

pub use certificate_provider::{CertificateProviderStatus, CertificateProviderStore};
pub use error::StoreError;
pub use record::RecordStore;
