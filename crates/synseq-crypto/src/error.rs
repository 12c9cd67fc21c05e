//! Error types for the PRF primitives.
//!
//! The primitives are total over well-formed inputs; the only failure is a
//! caller-side contract violation on the keyed hash input length. That is
//! surfaced as a typed error rather than truncation so the misuse cannot
//! silently weaken the derivation.

use thiserror::Error;

/// Errors from the keyed PRF primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Message handed to the keyed hash exceeds the supported input size.
    #[error("keyed hash input of {len} bytes exceeds the {max}-byte maximum")]
    InputTooLong {
        /// Length of the rejected message
        len: usize,
        /// Maximum supported message length
        max: usize,
    },
}
