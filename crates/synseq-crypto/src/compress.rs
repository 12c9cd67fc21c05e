//! One-shot message-digest compression step.
//!
//! A single application of the MD5 compression function: 128-bit state,
//! 64-byte block, four rounds of sixteen steps, feed-forward add of the
//! incoming state. There is no padding, length suffix or multi-block
//! chaining here — this is not the iterated MD5 hash. The step is reused
//! purely as a keyed mixing primitive over inputs that always fit one
//! block, which skips the framing overhead a general digest would pay.
//!
//! # Security
//!
//! - One-way over fixed-size inputs: recovering block words (the secret)
//!   from the output state requires inverting the compression step
//! - Branch-free: the message schedule is a fixed permutation, so run time
//!   is independent of state and block values

/// Number of 32-bit words in the compression state (128 bits).
pub const STATE_WORDS: usize = 4;

/// Number of 32-bit words in one input block (64 bytes).
pub const BLOCK_WORDS: usize = 16;

/// Per-step addends, `floor(abs(sin(i + 1)) * 2^32)` for step `i`.
const ADDEND: [u32; 64] = [
    0xd76a_a478, 0xe8c7_b756, 0x2420_70db, 0xc1bd_ceee,
    0xf57c_0faf, 0x4787_c62a, 0xa830_4613, 0xfd46_9501,
    0x6980_98d8, 0x8b44_f7af, 0xffff_5bb1, 0x895c_d7be,
    0x6b90_1122, 0xfd98_7193, 0xa679_438e, 0x49b4_0821,
    0xf61e_2562, 0xc040_b340, 0x265e_5a51, 0xe9b6_c7aa,
    0xd62f_105d, 0x0244_1453, 0xd8a1_e681, 0xe7d3_fbc8,
    0x21e1_cde6, 0xc337_07d6, 0xf4d5_0d87, 0x455a_14ed,
    0xa9e3_e905, 0xfcef_a3f8, 0x676f_02d9, 0x8d2a_4c8a,
    0xfffa_3942, 0x8771_f681, 0x6d9d_6122, 0xfde5_380c,
    0xa4be_ea44, 0x4bde_cfa9, 0xf6bb_4b60, 0xbebf_bc70,
    0x289b_7ec6, 0xeaa1_27fa, 0xd4ef_3085, 0x0488_1d05,
    0xd9d4_d039, 0xe6db_99e5, 0x1fa2_7cf8, 0xc4ac_5665,
    0xf429_2244, 0x432a_ff97, 0xab94_23a7, 0xfc93_a039,
    0x655b_59c3, 0x8f0c_cc92, 0xffef_f47d, 0x8584_5dd1,
    0x6fa8_7e4f, 0xfe2c_e6e0, 0xa301_4314, 0x4e08_11a1,
    0xf753_7e82, 0xbd3a_f235, 0x2ad7_d2bb, 0xeb86_d391,
];

/// Per-step left-rotation amounts, grouped by round.
const ROTATION: [u32; 64] = [
    7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22,
    5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20,
    4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23,
    6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21,
];

/// Run one compression step over `state` with `block` as the message.
///
/// Deterministic and total: identical inputs always produce identical
/// outputs, and every input — all-zero or adversarial — is valid. The
/// returned state includes the feed-forward addition of the incoming
/// state, so the step is not invertible from its output alone.
#[must_use]
pub fn compress(state: [u32; STATE_WORDS], block: &[u32; BLOCK_WORDS]) -> [u32; STATE_WORDS] {
    let [mut a, mut b, mut c, mut d] = state;

    for step in 0..64 {
        // Round-dependent nonlinear function and message word order.
        let (mixed, word) = match step / 16 {
            0 => ((b & c) | (!b & d), step),
            1 => ((b & d) | (c & !d), (5 * step + 1) % 16),
            2 => (b ^ c ^ d, (3 * step + 5) % 16),
            _ => (c ^ (b | !d), (7 * step) % 16),
        };
        let rotated = a
            .wrapping_add(mixed)
            .wrapping_add(block[word])
            .wrapping_add(ADDEND[step])
            .rotate_left(ROTATION[step]);
        (a, b, c, d) = (d, b.wrapping_add(rotated), b, c);
    }

    [
        state[0].wrapping_add(a),
        state[1].wrapping_add(b),
        state[2].wrapping_add(c),
        state[3].wrapping_add(d),
    ]
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    /// RFC 1321 initial state. Only the tests need it: production callers
    /// seed the state from connection data, never from the digest IV.
    const MD5_INIT: [u32; STATE_WORDS] =
        [0x6745_2301, 0xefcd_ab89, 0x98ba_dcfe, 0x1032_5476];

    /// MD5 padding for a short message, so the published digests can pin
    /// the step bit-exactly without a general hash API.
    fn padded_block(message: &[u8]) -> [u32; BLOCK_WORDS] {
        assert!(message.len() < 56, "single-block padding only");
        let mut bytes = [0u8; 64];
        bytes[..message.len()].copy_from_slice(message);
        bytes[message.len()] = 0x80;
        bytes[56..64].copy_from_slice(&((message.len() as u64) * 8).to_le_bytes());

        let mut block = [0u32; BLOCK_WORDS];
        for (word, chunk) in block.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        block
    }

    #[test]
    fn reproduces_md5_digest_of_empty_message() {
        // md5("") = d41d8cd98f00b204e9800998ecf8427e
        let digest = compress(MD5_INIT, &padded_block(b""));
        assert_eq!(digest, [0xd98c_1dd4, 0x04b2_008f, 0x9809_80e9, 0x7e42_f8ec]);
    }

    #[test]
    fn reproduces_md5_digest_of_abc() {
        // md5("abc") = 900150983cd24fb0d6963f7d28e17f72
        let digest = compress(MD5_INIT, &padded_block(b"abc"));
        assert_eq!(digest, [0x9850_0190, 0xb04f_d23c, 0x7d3f_96d6, 0x727f_e128]);
    }

    #[test]
    fn all_zero_inputs_are_valid() {
        let digest = compress([0; STATE_WORDS], &[0; BLOCK_WORDS]);
        assert_ne!(digest, [0; STATE_WORDS], "zero inputs must still mix");
    }

    #[test]
    fn single_word_block_change_diffuses() {
        let base = compress(MD5_INIT, &[0; BLOCK_WORDS]);
        let mut block = [0; BLOCK_WORDS];
        block[0] = 1;
        let flipped = compress(MD5_INIT, &block);

        let distance: u32 =
            base.iter().zip(&flipped).map(|(x, y)| (x ^ y).count_ones()).sum();
        assert!(distance >= 32, "one flipped input bit moved only {distance} output bits");
    }

    proptest! {
        #[test]
        fn deterministic_over_input_space(
            state in any::<[u32; STATE_WORDS]>(),
            block in any::<[u32; BLOCK_WORDS]>(),
        ) {
            assert_eq!(compress(state, &block), compress(state, &block));
        }

        #[test]
        fn state_change_changes_digest(
            state in any::<[u32; STATE_WORDS]>(),
            block in any::<[u32; BLOCK_WORDS]>(),
            word in 0_usize..STATE_WORDS,
        ) {
            let mut other = state;
            other[word] ^= 1;
            assert_ne!(compress(state, &block), compress(other, &block));
        }
    }
}
