//! Short-input keyed hash (SipHash-2-4).
//!
//! A dedicated PRF for messages of at most [`MAX_MESSAGE_LEN`] bytes:
//! 128-bit key in, 64-bit digest out. Message words are injected into a
//! four-word state through add/rotate/xor rounds — two per word, four more
//! to finalize after a length-tagged final block.
//!
//! # Security
//!
//! - Keyed by construction: unlike hashing `secret || message` with a
//!   public digest, the key enters the state before any message word, so
//!   the PRF resists adaptive chosen-input attacks while the key is secret
//! - Branch-free: rotations, XORs and modular adds only; run time depends
//!   on message length alone, never on key or message values

use crate::error::CryptoError;

/// Key length in bytes (128 bits).
pub const KEY_LEN: usize = 16;

/// Largest supported message length in bytes.
///
/// Exceeding it is a caller programming error and fails with
/// [`CryptoError::InputTooLong`]; the fixed-format inputs this crate is
/// built for never come close.
pub const MAX_MESSAGE_LEN: usize = 64;

/// Digest length in bytes (64 bits).
pub const OUTPUT_LEN: usize = 8;

/// Compression rounds applied per message word.
const C_ROUNDS: usize = 2;

/// Finalization rounds applied after the final block.
const D_ROUNDS: usize = 4;

// "somepseudorandomlygeneratedbytes", split into four little-endian words.
const IV: [u64; 4] = [
    0x736f_6d65_7073_6575,
    0x646f_7261_6e64_6f6d,
    0x6c79_6765_6e65_7261,
    0x7465_6462_7974_6573,
];

struct State {
    v0: u64,
    v1: u64,
    v2: u64,
    v3: u64,
}

impl State {
    fn new(k0: u64, k1: u64) -> Self {
        Self { v0: IV[0] ^ k0, v1: IV[1] ^ k1, v2: IV[2] ^ k0, v3: IV[3] ^ k1 }
    }

    fn round(&mut self) {
        self.v0 = self.v0.wrapping_add(self.v1);
        self.v1 = self.v1.rotate_left(13);
        self.v1 ^= self.v0;
        self.v0 = self.v0.rotate_left(32);
        self.v2 = self.v2.wrapping_add(self.v3);
        self.v3 = self.v3.rotate_left(16);
        self.v3 ^= self.v2;
        self.v0 = self.v0.wrapping_add(self.v3);
        self.v3 = self.v3.rotate_left(21);
        self.v3 ^= self.v0;
        self.v2 = self.v2.wrapping_add(self.v1);
        self.v1 = self.v1.rotate_left(17);
        self.v1 ^= self.v2;
        self.v2 = self.v2.rotate_left(32);
    }

    fn absorb(&mut self, word: u64) {
        self.v3 ^= word;
        for _ in 0..C_ROUNDS {
            self.round();
        }
        self.v0 ^= word;
    }

    fn finalize(mut self) -> u64 {
        self.v2 ^= 0xff;
        for _ in 0..D_ROUNDS {
            self.round();
        }
        self.v0 ^ self.v1 ^ self.v2 ^ self.v3
    }
}

/// Interpret up to eight bytes as a little-endian word.
fn le_word(bytes: &[u8]) -> u64 {
    bytes.iter().rev().fold(0, |word, &byte| (word << 8) | u64::from(byte))
}

/// Hash `message` under `key`, producing an 8-byte digest.
///
/// Deterministic: identical key and message always produce an identical
/// digest. The digest is the little-endian serialization of the final
/// 64-bit state fold.
///
/// # Errors
///
/// - `InputTooLong`: `message` exceeds [`MAX_MESSAGE_LEN`] bytes
pub fn keyed_hash(
    key: &[u8; KEY_LEN],
    message: &[u8],
) -> Result<[u8; OUTPUT_LEN], CryptoError> {
    if message.len() > MAX_MESSAGE_LEN {
        return Err(CryptoError::InputTooLong { len: message.len(), max: MAX_MESSAGE_LEN });
    }

    let mut state = State::new(le_word(&key[..8]), le_word(&key[8..]));

    let mut words = message.chunks_exact(8);
    for word in words.by_ref() {
        state.absorb(le_word(word));
    }

    // Final block: remaining tail bytes with the message length in the
    // top byte, so "ab" and "ab\0" cannot collide.
    let tail = le_word(words.remainder()) | ((message.len() as u64 & 0xff) << 56);
    state.absorb(tail);

    Ok(state.finalize().to_le_bytes())
}
