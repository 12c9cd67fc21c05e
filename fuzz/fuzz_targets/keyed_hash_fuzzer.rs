//! Fuzz target for the short-input keyed hash
//!
//! # Strategy
//!
//! - Arbitrary keys
//! - Message lengths straddling the 64-byte limit
//!
//! # Invariants
//!
//! - Accepts exactly the lengths up to the limit, typed error beyond
//! - Deterministic (same key and message → same digest)
//! - Never panics

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use synseq_crypto::{keyed_hash, CryptoError, KEY_LEN, MAX_MESSAGE_LEN, OUTPUT_LEN};

#[derive(Debug, Arbitrary)]
struct HashScenario {
    key: [u8; KEY_LEN],
    message: Vec<u8>,
}

fuzz_target!(|scenario: HashScenario| {
    let first = keyed_hash(&scenario.key, &scenario.message);
    let second = keyed_hash(&scenario.key, &scenario.message);
    assert_eq!(first, second, "keyed hash must be deterministic");

    match first {
        Ok(digest) => {
            assert!(scenario.message.len() <= MAX_MESSAGE_LEN);
            assert_eq!(digest.len(), OUTPUT_LEN);
        }
        Err(CryptoError::InputTooLong { len, max }) => {
            assert!(len > MAX_MESSAGE_LEN, "in-range length {len} rejected");
            assert_eq!(len, scenario.message.len());
            assert_eq!(max, MAX_MESSAGE_LEN);
        }
    }
});
