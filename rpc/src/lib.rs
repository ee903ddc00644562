//! HTTP server for witness code entry.
//!
//! Provides endpoints for:
//! - Independent witness and certificate provider code entry (form posts)
//! - Witnessing status of a record
//! - Attempt outcome counters
//! - Health

pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use error::RpcError;
pub use server::{router, RpcServer};
pub use state::RpcState;
