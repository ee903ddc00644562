//! Nullable infrastructure for deterministic testing.
//!
//! All external dependencies (clock, storage, notifications) are abstracted
//! behind traits. This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically, including injected failures
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod notifier;
pub mod store;

pub use clock::NullClock;
pub use notifier::NullNotifier;
pub use store::NullRecordStore;
