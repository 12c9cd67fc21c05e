//! Synseq Keyed PRF Primitives
//!
//! The two fixed-size keyed pseudorandom functions backing TCP initial
//! sequence number derivation. Pure functions with deterministic outputs;
//! callers provide all keying material.
//!
//! # Construction
//!
//! Both primitives turn a secret plus a short, fixed-format input into an
//! attacker-unpredictable digest:
//!
//! ```text
//! (secret, packed tuple)
//!        │
//!        ├─► compress  — one MD5 compression step over a 64-byte block
//!        │              (128-bit state in, 128-bit state out)
//!        │
//!        └─► keyed_hash — SipHash-2-4 over a ≤64-byte message
//!                         (128-bit key in, 64-bit digest out)
//! ```
//!
//! Neither is a general-purpose hash API. `compress` is a single
//! application of the compression step with no padding, length framing or
//! multi-block chaining; `keyed_hash` caps its input at
//! [`MAX_MESSAGE_LEN`] bytes and fails fast beyond it.
//!
//! # Security
//!
//! Unpredictability:
//! - `keyed_hash` is a dedicated PRF: indistinguishable from random to a
//!   caller who can choose inputs adaptively but does not hold the key
//! - `compress` is used keyed (secret words fill the block), relying on the
//!   one-wayness of the compression step over fixed-size inputs
//!
//! Timing:
//! - Both primitives are branch-free over key- and input-derived data:
//!   rotations, XORs and modular adds only, no secret-indexed lookups
//! - Run time depends only on input length, never on input or key values

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod compress;
pub mod error;
pub mod keyed_hash;

pub use compress::{BLOCK_WORDS, STATE_WORDS, compress};
pub use error::CryptoError;
pub use keyed_hash::{KEY_LEN, MAX_MESSAGE_LEN, OUTPUT_LEN, keyed_hash};
