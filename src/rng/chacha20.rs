//! ChaCha20 block function
//!
//! This module provides a low-level, dependency-free implementation of the
//! ChaCha20 block function in its original 64-bit counter / 64-bit nonce
//! layout.
//!
//! It is the only source of randomness for the stream, and therefore:
//! - avoids heap allocations
//! - is a pure function of `(key, nonce, counter)`
//! - exposes only minimal, explicit APIs
//!
//! The output is returned as sixteen `u32` words rather than bytes: the stream
//! consumes keystream one word at a time and never needs the serialized form.

use super::key::SecretKey;

/// ChaCha20 constant words.
///
/// These values correspond to the ASCII string:
/// `"expand 32-byte k"` encoded as little-endian `u32` words.
const CHACHA20_CONSTANTS: [u32; 4] = [
    0x6170_7865, // "expa"
    0x3320_646e, // "nd 3"
    0x7962_2d32, // "2-by"
    0x6b20_6574, // "te k"
];

/// Number of 32-bit words in one keystream block.
pub const BLOCK_WORDS: usize = 16;

/// State indices mixed by the first half of a double round.
const COLUMNS: [[usize; 4]; 4] = [[0, 4, 8, 12], [1, 5, 9, 13], [2, 6, 10, 14], [3, 7, 11, 15]];

/// State indices mixed by the second half of a double round.
const DIAGONALS: [[usize; 4]; 4] = [[0, 5, 10, 15], [1, 6, 11, 12], [2, 7, 8, 13], [3, 4, 9, 14]];

/// Add-rotate-xor step on the four state words named by `idx`.
///
/// Rotation amounts are 16, 12, 8, 7, in that order. Stream output
/// depends on every one of them, bit for bit.
#[inline(always)]
fn quarter_round(state: &mut [u32; BLOCK_WORDS], idx: [usize; 4]) {
    let [a, b, c, d] = idx;

    state[a] = state[a].wrapping_add(state[b]);
    state[d] = (state[d] ^ state[a]).rotate_left(16);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_left(12);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] = (state[d] ^ state[a]).rotate_left(8);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_left(7);
}

/// Ten double rounds over a working copy of the block.
fn permute(state: &mut [u32; BLOCK_WORDS]) {
    for _ in 0..10 {
        for idx in COLUMNS.into_iter().chain(DIAGONALS) {
            quarter_round(state, idx);
        }
    }
}

/// Generates a single ChaCha20 keystream block.
///
/// # Parameters
/// - `key`: 256-bit secret key
/// - `nonce`: 64-bit nonce, placed in state words 14 (low) and 15 (high)
/// - `counter`: 64-bit block counter, placed in state words 12 (low) and 13 (high)
///
/// # Returns
/// The sixteen keystream words, in state order.
pub fn block(key: &SecretKey, nonce: u64, counter: u64) -> [u32; BLOCK_WORDS] {
    let mut state = [0u32; BLOCK_WORDS];

    state[0..4].copy_from_slice(&CHACHA20_CONSTANTS);
    state[4..12].copy_from_slice(key.words());

    state[12] = counter as u32;
    state[13] = (counter >> 32) as u32;

    state[14] = nonce as u32;
    state[15] = (nonce >> 32) as u32;

    // Preserve original state for feed-forward
    let original = state;

    permute(&mut state);

    state
        .iter_mut()
        .zip(&original)
        .for_each(|(s, o)| *s = s.wrapping_add(*o));

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_round_rfc8439_2_1_1() {
        let mut state = [0u32; BLOCK_WORDS];
        state[0] = 0x1111_1111;
        state[1] = 0x0102_0304;
        state[2] = 0x9b8d_6f43;
        state[3] = 0x0123_4567;

        quarter_round(&mut state, [0, 1, 2, 3]);

        assert_eq!(&state[..4], &[0xea2a_92f4, 0xcb1c_f8ce, 0x4581_472e, 0x5881_c4bb]);
    }

    #[test]
    fn quarter_round_rfc8439_2_2_1_on_diagonal() {
        #[rustfmt::skip]
        let mut state = [
            0x879531e0, 0xc5ecf37d, 0x516461b1, 0xc9a62f8a,
            0x44c20ef3, 0x3390af7f, 0xd9fc690b, 0x2a5f714c,
            0x53372767, 0xb00a5631, 0x974c541a, 0x359e9963,
            0x5c971061, 0x3d631689, 0x2098d9d6, 0x91dbd320,
        ];

        quarter_round(&mut state, DIAGONALS[2]);

        assert_eq!(state[2], 0xbdb886dc);
        assert_eq!(state[7], 0xcfacafd2);
        assert_eq!(state[8], 0xe46bea80);
        assert_eq!(state[13], 0xccc07c79);
    }
}
