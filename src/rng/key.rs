//! Secret key material.

use core::fmt;

/// 256-bit ChaCha20 key, stored as eight 32-bit words.
///
/// Every stream in a build shares the same key. Knowing the key, the problem
/// label and the test id is enough to reproduce a stream, so the key must be
/// kept private for as long as the generated data has to stay unpredictable.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SecretKey([u32; 8]);

impl SecretKey {
    /// Builds a key from its eight words, in ChaCha20 state order.
    pub const fn from_words(words: [u32; 8]) -> Self {
        Self(words)
    }

    /// Builds a key from 32 bytes, read as little-endian words.
    ///
    /// This is the byte layout used by RFC 8439.
    pub fn from_le_bytes(bytes: &[u8; 32]) -> Self {
        let mut words = [0u32; 8];

        words
            .iter_mut()
            .zip(bytes.chunks_exact(4))
            .for_each(|(w, b)| *w = u32::from_le_bytes([b[0], b[1], b[2], b[3]]));

        Self(words)
    }

    /// Returns the key words in ChaCha20 state order.
    pub const fn words(&self) -> &[u32; 8] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

/// Key used by [`Random::new`](crate::Random::new).
///
/// WARNING: this key should be random, unique per contest and kept private.
/// Regenerate it for every contest, for example with:
///
/// ```text
/// hexdump -e '4/4 "0x%08X, " "\n"' /dev/random | head -n 2
/// ```
///
/// Changing it changes every generated test.
#[rustfmt::skip]
pub const CONTEST_KEY: SecretKey = SecretKey::from_words([
    0xD2EE_7398, 0xC196_3D5C, 0xAA54_D7C8, 0x5DA5_A588,
    0x7391_688F, 0x3BE1_14E4, 0x07DF_CCA9, 0x5053_BCBC,
]);
