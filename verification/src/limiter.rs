//! Attempt limiter shared by both witnessing roles.
//!
//! A token bucket whose state lives on the persisted record instead of in
//! process memory, so failed attempts stay counted across restarts. Time is
//! always supplied by the caller.

use serde::{Deserialize, Serialize};
use witness_types::{Timestamp, WitnessingParams};

/// Bounds how many codes can be tried per window.
///
/// Tokens represent attempts. Once a full window has passed since the last
/// refill, `refill` tokens are added back, capped at `capacity`. A new limiter
/// starts with `refill` tokens so the first window is not a free burst up to
/// the cap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limiter {
    /// Window length in seconds.
    window_secs: u64,
    /// Tokens added per elapsed window.
    refill: u32,
    /// Maximum tokens.
    capacity: u32,
    /// Tokens left in the current window.
    remaining: u32,
    /// When the current window started.
    window_start: Timestamp,
}

impl Limiter {
    pub fn new(window_secs: u64, refill: u32, capacity: u32, now: Timestamp) -> Self {
        Self {
            window_secs,
            refill,
            capacity,
            remaining: refill.min(capacity),
            window_start: now,
        }
    }

    /// A limiter with the configured default window, refill and capacity.
    pub fn from_params(params: &WitnessingParams, now: Timestamp) -> Self {
        Self::new(
            params.limiter_window_secs,
            params.limiter_refill,
            params.limiter_capacity,
            now,
        )
    }

    /// Try to spend one attempt.
    ///
    /// Returns `true` and consumes a token if one is available. Returns `false`
    /// without consuming anything when the budget for this window is spent.
    pub fn allow(&mut self, now: Timestamp) -> bool {
        self.refill(now);
        if self.remaining > 0 {
            self.remaining -= 1;
            true
        } else {
            false
        }
    }

    fn refill(&mut self, now: Timestamp) {
        if self.window_start.elapsed_since(now) < self.window_secs {
            return;
        }
        self.remaining = self.remaining.saturating_add(self.refill).min(self.capacity);
        self.window_start = now;
    }

    /// Tokens left. Useful for diagnostics.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn window_start(&self) -> Timestamp {
        self.window_start
    }
}
