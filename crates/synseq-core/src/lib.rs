//! Synseq Core
//!
//! Derivation of TCP initial sequence numbers: given a connection's
//! four-tuple, produce a 32-bit value that an off-path attacker cannot
//! predict, while staying deterministic for a fixed secret and tuple so
//! retransmitted SYNs inside a short window agree.
//!
//! # Derivation Pipeline
//!
//! ```text
//! FourTuple ──► canonical packing (per backend)
//!                      │
//!                      ▼
//!        one keyed PRF invocation (compress | keyed_hash)
//!                      │
//!                      ▼
//!        base = first 32 bits of PRF output
//!                      │
//!                      ▼
//!        isn = base + (coarse tick >> 6)
//! ```
//!
//! The tick term makes sequence numbers drift forward over real time, as
//! TCP requires of ISNs, without persisting any per-connection state.
//!
//! # Security
//!
//! Unpredictability:
//! - The process-wide secret keys every derivation; without it, outputs
//!   are indistinguishable from random to a remote observer
//! - An all-zero or low-entropy secret defeats the guarantee; the core
//!   consumes the buffer as-is and never validates entropy
//!
//! Rotation:
//! - [`SecretStore`] replaces the secret by swapping a shared handle, so
//!   an in-flight derivation reads the old buffer or the new one in full,
//!   never a torn mix
//!
//! Timing:
//! - The derivation path is branch-free over secret-derived data and runs
//!   in bounded, input-independent time

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod clock;
pub mod isn;
pub mod secret;
pub mod tuple;

pub use clock::{FixedTicks, MonotonicTicks, TickSource};
pub use isn::{Backend, IsnGenerator, TICK_SHIFT, sequence_number};
pub use secret::{NetSecret, SECRET_BYTES, SECRET_WORDS, SecretStore};
pub use tuple::FourTuple;
