//! Fundamental types for witness-code verification.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! timestamps and clocks, record identifiers, witnessing roles, and the tunable
//! witnessing parameters.

pub mod id;
pub mod params;
pub mod role;
pub mod time;

pub use id::RecordId;
pub use params::WitnessingParams;
pub use role::Role;
pub use time::{Clock, SystemClock, Timestamp};
