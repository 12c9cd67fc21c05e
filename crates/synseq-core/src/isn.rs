//! Sequence number derivation.
//!
//! Packs a connection four-tuple and the process secret into the chosen
//! backend's canonical layout, invokes that PRF exactly once, and scales
//! the result by the coarse tick.
//!
//! Canonical layouts:
//!
//! ```text
//! Md5      state  = [ src_addr | dst_addr | src_port<<16 | dst_port | tag word ]
//!          block  = all 16 secret words
//!          base   = first output word
//!
//! SipHash  message (16 bytes, big-endian fields):
//!            bytes  0..4   src_addr
//!            bytes  4..8   dst_addr
//!            bytes  8..10  src_port
//!            bytes 10..12  dst_port
//!            bytes 12..16  tag word
//!          key    = leading 16 secret bytes
//!          base   = first 4 output bytes (little-endian u32)
//! ```
//!
//! Both layouts fold in the same designated secret word (the buffer's
//! last), so the backends stay drop-in interchangeable for latency
//! comparison without renegotiating the packing.
//!
//! # Security
//!
//! - One PRF call per derivation; no chaining or amplification beyond
//!   what the PRF itself performs
//! - The drift term `tick >> 6` is added outside the PRF: repeated
//!   derivations inside one coarse bucket agree exactly, later ones move
//!   forward, and neither reveals anything about the base

use std::sync::Arc;

use synseq_crypto::{compress, keyed_hash};

use crate::clock::TickSource;
use crate::secret::{NetSecret, SecretStore};
use crate::tuple::FourTuple;

/// Right-shift applied to the tick before it joins the base value.
///
/// Sixty-four ticks share one bucket: immediate retransmissions of the
/// same SYN land on the same sequence number, retries after a real pause
/// land ahead of it.
pub const TICK_SHIFT: u32 = 6;

/// The two PRF backends.
///
/// A closed set by design: the pair exists so the constructions can be
/// compared like-for-like, not as an extension point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// One MD5 compression step over the secret block.
    Md5,
    /// SipHash-2-4 over a 16-byte packed message.
    SipHash,
}

/// Derive the sequence number for `tuple` at `tick`.
///
/// Deterministic and total: fixed (secret, tuple, tick) always yields the
/// same value, every input is well-formed, and nothing is mutated or
/// logged. Increasing only the tick moves the result forward by exactly
/// the tick-bucket difference, modulo 2^32.
#[must_use]
pub fn sequence_number(
    tuple: &FourTuple,
    secret: &NetSecret,
    backend: Backend,
    tick: u32,
) -> u32 {
    let base = match backend {
        Backend::Md5 => md5_base(tuple, secret),
        Backend::SipHash => siphash_base(tuple, secret),
    };
    base.wrapping_add(tick >> TICK_SHIFT)
}

/// Compression backend: tuple and tag word seed the state, the whole
/// secret is the block.
fn md5_base(tuple: &FourTuple, secret: &NetSecret) -> u32 {
    let state = [
        tuple.src_addr,
        tuple.dst_addr,
        (u32::from(tuple.src_port) << 16) | u32::from(tuple.dst_port),
        secret.tag_word(),
    ];
    compress(state, secret.words())[0]
}

/// Keyed hash backend: big-endian packed message under the leading
/// sixteen secret bytes.
fn siphash_base(tuple: &FourTuple, secret: &NetSecret) -> u32 {
    let mut message = [0u8; 16];
    message[0..4].copy_from_slice(&tuple.src_addr.to_be_bytes());
    message[4..8].copy_from_slice(&tuple.dst_addr.to_be_bytes());
    message[8..10].copy_from_slice(&tuple.src_port.to_be_bytes());
    message[10..12].copy_from_slice(&tuple.dst_port.to_be_bytes());
    message[12..16].copy_from_slice(&secret.tag_word().to_be_bytes());

    let Ok(digest) = keyed_hash(&secret.key128(), &message) else {
        unreachable!("packed tuple message is 16 bytes, within the keyed hash limit")
    };
    u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Owning entry point for connection establishment.
///
/// Bundles the shared secret store, a tick source and the chosen backend;
/// one [`isn`](Self::isn) call per outbound SYN or SYN-ACK. The generator
/// itself is stateless between calls and safe to share across threads
/// (given `T: Sync`).
pub struct IsnGenerator<T> {
    secrets: Arc<SecretStore>,
    ticks: T,
    backend: Backend,
}

impl<T: TickSource> IsnGenerator<T> {
    /// Create a generator over an initialized secret store.
    pub fn new(secrets: Arc<SecretStore>, ticks: T, backend: Backend) -> Self {
        Self { secrets, ticks, backend }
    }

    /// The initial sequence number for a connection attempt.
    #[must_use]
    pub fn isn(&self, tuple: &FourTuple) -> u32 {
        let secret = self.secrets.snapshot();
        sequence_number(tuple, &secret, self.backend, self.ticks.coarse_tick())
    }

    /// The backend this generator derives with.
    #[must_use]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// The shared secret store, for rotation by the owning process.
    #[must_use]
    pub fn secrets(&self) -> &Arc<SecretStore> {
        &self.secrets
    }
}
