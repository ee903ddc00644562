//! Witnessing parameters.
//!
//! Every threshold the verification flow depends on lives here, so none of
//! them are buried as magic numbers in the algorithms.

use serde::{Deserialize, Serialize};

/// How long an issued code stays valid: 15 minutes.
pub const DEFAULT_CODE_TTL_SECS: u64 = 15 * 60;

/// Expected length of a submitted code, in characters.
pub const DEFAULT_CODE_LENGTH: usize = 4;

/// Attempt limiter window: one minute.
pub const DEFAULT_LIMITER_WINDOW_SECS: u64 = 60;

/// Attempts added back to the limiter each elapsed window.
pub const DEFAULT_LIMITER_REFILL: u32 = 5;

/// Most attempts the limiter can bank.
pub const DEFAULT_LIMITER_CAPACITY: u32 = 10;

/// Tunable values for code expiry, input validation and attempt limiting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WitnessingParams {
    /// A code issued at `t` is expired from `t + code_ttl_secs` onwards.
    pub code_ttl_secs: u64,

    /// Required length of a submitted code.
    pub code_length: usize,

    /// Length of one attempt window in seconds.
    pub limiter_window_secs: u64,

    /// Attempts granted when a limiter is created, and added per elapsed window.
    pub limiter_refill: u32,

    /// Upper bound on banked attempts.
    pub limiter_capacity: u32,
}

impl Default for WitnessingParams {
    fn default() -> Self {
        Self {
            code_ttl_secs: DEFAULT_CODE_TTL_SECS,
            code_length: DEFAULT_CODE_LENGTH,
            limiter_window_secs: DEFAULT_LIMITER_WINDOW_SECS,
            limiter_refill: DEFAULT_LIMITER_REFILL,
            limiter_capacity: DEFAULT_LIMITER_CAPACITY,
        }
    }
}
