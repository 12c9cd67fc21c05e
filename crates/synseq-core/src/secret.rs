//! Process-wide keying material and its rotation discipline.
//!
//! The secret is a 64-byte buffer (16 × 32-bit words) that the owning
//! process fills with cryptographically strong random data before the
//! first derivation. The core never generates or reseeds it; it only
//! reads it. [`SecretStore`] makes replacement safe for concurrent
//! readers by swapping a shared handle instead of mutating in place.
//!
//! # Security
//!
//! - Initialization is a precondition, not a checked invariant: an
//!   all-zero secret derives valid-looking but predictable sequence
//!   numbers
//! - Secret words are zeroized when the last handle drops
//! - The canonical byte view is little-endian per word on every platform,
//!   so a given secret derives identical sequence numbers everywhere

use std::sync::{Arc, PoisonError, RwLock};

use synseq_crypto::{BLOCK_WORDS, KEY_LEN};
use zeroize::Zeroize;

/// Number of 32-bit words in the secret buffer.
pub const SECRET_WORDS: usize = BLOCK_WORDS;

/// Size of the secret buffer in bytes.
pub const SECRET_BYTES: usize = SECRET_WORDS * 4;

/// Index of the designated word mixed into the packed input.
///
/// Both backends fold this same word into their input layout; the choice
/// of the last word is arbitrary but fixed, since changing it changes
/// every derived sequence number.
const TAG_WORD: usize = SECRET_WORDS - 1;

/// The process-wide derivation secret.
///
/// Holds exactly [`SECRET_WORDS`] words of caller-supplied entropy.
/// Cloning copies the words; every copy zeroizes itself on drop.
#[derive(Clone)]
pub struct NetSecret {
    words: [u32; SECRET_WORDS],
}

impl NetSecret {
    /// Wrap a word buffer as a secret.
    #[must_use]
    pub const fn from_words(words: [u32; SECRET_WORDS]) -> Self {
        Self { words }
    }

    /// Wrap a byte buffer as a secret, reading little-endian words.
    #[must_use]
    pub fn from_bytes(bytes: &[u8; SECRET_BYTES]) -> Self {
        let mut words = [0u32; SECRET_WORDS];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self { words }
    }

    /// The full word buffer, used whole as the compression block.
    #[must_use]
    pub const fn words(&self) -> &[u32; SECRET_WORDS] {
        &self.words
    }

    /// The leading 16 bytes, used as the keyed hash key.
    #[must_use]
    pub fn key128(&self) -> [u8; KEY_LEN] {
        let mut key = [0u8; KEY_LEN];
        for (chunk, word) in key.chunks_exact_mut(4).zip(&self.words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        key
    }

    /// The designated word mixed into the packed input by both backends.
    #[must_use]
    pub const fn tag_word(&self) -> u32 {
        self.words[TAG_WORD]
    }
}

impl Drop for NetSecret {
    fn drop(&mut self) {
        self.words.zeroize();
    }
}

/// Shared secret handle with torn-read-free rotation.
///
/// Readers take an [`Arc`] snapshot of the current secret and derive from
/// that; rotation installs a fresh `Arc` under a write lock held only for
/// the swap. A derivation therefore observes exactly one complete secret,
/// and a secret being rotated out stays alive until its last in-flight
/// reader drops the snapshot.
pub struct SecretStore {
    current: RwLock<Arc<NetSecret>>,
}

impl SecretStore {
    /// Create a store over an already-initialized secret.
    #[must_use]
    pub fn new(secret: NetSecret) -> Self {
        Self { current: RwLock::new(Arc::new(secret)) }
    }

    /// Snapshot the current secret.
    ///
    /// The snapshot stays valid across concurrent rotations; it simply
    /// keeps deriving from the buffer that was current when it was taken.
    #[must_use]
    pub fn snapshot(&self) -> Arc<NetSecret> {
        // A panicking writer cannot leave a partial secret behind (the
        // buffer is replaced whole), so a poisoned lock is still readable.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the secret.
    ///
    /// Rotation policy (when, and where entropy comes from) is the owning
    /// process's concern; the store only guarantees the swap is atomic
    /// from every reader's point of view.
    pub fn rotate(&self, next: NetSecret) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Secret whose canonical byte view is 0x00, 0x01, .. 0x3f.
    fn ascending_secret() -> NetSecret {
        let mut bytes = [0u8; SECRET_BYTES];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = i as u8;
        }
        NetSecret::from_bytes(&bytes)
    }

    #[test]
    fn byte_and_word_constructors_agree() {
        let from_bytes = ascending_secret();
        let mut words = [0u32; SECRET_WORDS];
        for (i, word) in words.iter_mut().enumerate() {
            let base = (i * 4) as u32;
            *word = u32::from_le_bytes([
                base as u8,
                (base + 1) as u8,
                (base + 2) as u8,
                (base + 3) as u8,
            ]);
        }
        assert_eq!(NetSecret::from_words(words).words(), from_bytes.words());
    }

    #[test]
    fn key_is_the_leading_sixteen_bytes() {
        let key = ascending_secret().key128();
        let expected: Vec<u8> = (0..16).collect();
        assert_eq!(key.as_slice(), expected.as_slice());
    }

    #[test]
    fn tag_word_is_the_last_word() {
        // Bytes 60..64 of the ascending secret, little-endian.
        assert_eq!(ascending_secret().tag_word(), u32::from_le_bytes([60, 61, 62, 63]));
    }

    #[test]
    fn rotation_swaps_the_snapshot() {
        let store = SecretStore::new(NetSecret::from_words([1; SECRET_WORDS]));
        let before = store.snapshot();

        store.rotate(NetSecret::from_words([2; SECRET_WORDS]));
        let after = store.snapshot();

        assert_eq!(before.words(), &[1; SECRET_WORDS], "old snapshot must stay intact");
        assert_eq!(after.words(), &[2; SECRET_WORDS]);
    }

    #[test]
    fn snapshots_share_one_buffer_until_rotation() {
        let store = SecretStore::new(NetSecret::from_words([7; SECRET_WORDS]));
        let a = store.snapshot();
        let b = store.snapshot();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
