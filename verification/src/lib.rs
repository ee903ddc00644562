//! Witness-code verification.
//!
//! Before a document counts as executed, two people must each type back a short
//! one-time code that was sent to them out-of-band:
//! 1. **Independent witness** goes first.
//! 2. **Certificate provider** goes second; their success submits the document.
//!
//! Both roles share one attempt limiter stored on the record, so guessing is
//! bounded across the whole flow rather than per role. Everything in this crate
//! is pure: time is passed in, and persistence and notification are left to the
//! caller.

pub mod code;
pub mod error;
pub mod form;
pub mod limiter;
pub mod record;
pub mod verifier;

pub use code::{WitnessCode, WitnessCodes};
pub use error::{InputError, Rejection};
pub use form::{field_label, SubmittedCode, WITNESS_CODE_FIELD};
pub use limiter::Limiter;
pub use record::{RoleStatus, TaskState, WitnessingRecord, WitnessingStage};
pub use verifier::RoleVerifier;
