//! Keystream reservoir
//!
//! Serves bit requests of any width from 0 to 64 out of the ChaCha20
//! keystream. Keystream is buffered on two levels:
//!
//! - the words of the most recent block, consumed one at a time,
//! - the unused bits of the current word.
//!
//! A request consumes exactly as many bits as it asks for. Bits are never
//! served twice and never skipped.

use tracing::{error, trace};

use super::chacha20::{self, BLOCK_WORDS};
use super::key::SecretKey;
use crate::error::RandomError;

/// Keystream position of one stream.
pub(crate) struct Keystream {
    key: SecretKey,
    nonce: u64,

    /// Counter of the next block to generate.
    counter: u64,

    /// Most recently generated block.
    block: [u32; BLOCK_WORDS],

    /// Number of words of `block` already moved into the reservoir.
    cursor: usize,

    /// Unused bits, right aligned.
    word: u32,

    /// Number of valid bits in `word` (0..=32).
    available: u32,
}

impl Keystream {
    pub(crate) fn new(key: SecretKey, nonce: u64) -> Self {
        Self {
            key,
            nonce,
            counter: 0,
            block: [0; BLOCK_WORDS],
            cursor: BLOCK_WORDS,
            word: 0,
            available: 0,
        }
    }

    /// Returns `n` fresh keystream bits.
    ///
    /// Bits are taken from the low end of each keystream word. When a request
    /// spans several words, bits taken earlier end up in the higher positions
    /// of the result.
    ///
    /// # Errors
    /// - [`RandomError::InvalidBitCount`] if `n > 64`.
    /// - [`RandomError::KeystreamExhausted`] if the block counter would wrap.
    pub(crate) fn bits(&mut self, n: u32) -> Result<u64, RandomError> {
        if n > 64 {
            return Err(RandomError::InvalidBitCount { requested: n });
        }

        let mut n = n;
        let mut result = 0u64;

        while n > self.available {
            // `available` is at most 32, so neither shift can overflow.
            result = (result << self.available) | u64::from(self.word);
            n -= self.available;

            self.word = self.next_word()?;
            self.available = 32;
        }

        if n > 0 {
            let mask = (1u64 << n) - 1;

            result = (result << n) | (u64::from(self.word) & mask);
            self.word = self.word.checked_shr(n).unwrap_or(0);
            self.available -= n;
        }

        Ok(result)
    }

    /// Takes the next whole word from the current block, generating a new
    /// block when the current one is used up.
    ///
    /// The reservoir state is only touched once the word is available, so an
    /// exhausted stream stays exhausted.
    fn next_word(&mut self) -> Result<u32, RandomError> {
        if self.cursor == BLOCK_WORDS {
            let Some(next) = self.counter.checked_add(1) else {
                error!(nonce = self.nonce, "block counter would wrap, refusing to reuse keystream");
                return Err(RandomError::KeystreamExhausted);
            };

            trace!(nonce = self.nonce, counter = self.counter, "generating keystream block");

            self.block = chacha20::block(&self.key, self.nonce, self.counter);
            self.counter = next;
            self.cursor = 0;
        }

        let word = self.block[self.cursor];
        self.cursor += 1;

        Ok(word)
    }

    /// Moves the stream to the start of block `counter`, dropping buffered bits.
    #[cfg(test)]
    pub(crate) fn seek_block(&mut self, counter: u64) {
        self.counter = counter;
        self.cursor = BLOCK_WORDS;
        self.word = 0;
        self.available = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::sampler::Sampler;

    #[rustfmt::skip]
    const KEY: SecretKey = SecretKey::from_words([
        0x0302_0100, 0x0706_0504, 0x0b0a_0908, 0x0f0e_0d0c,
        0x1312_1110, 0x1716_1514, 0x1b1a_1918, 0x1f1e_1d1c,
    ]);
    const NONCE: u64 = 0x1234_5678_9abc_def0;

    #[test]
    fn zero_bits_consume_nothing() {
        let mut ks = Keystream::new(KEY, NONCE);

        assert_eq!(ks.bits(0).unwrap(), 0);
        assert_eq!(ks.counter, 0);
        assert_eq!(ks.available, 0);
    }

    #[test]
    fn rejects_more_than_64_bits() {
        let mut ks = Keystream::new(KEY, NONCE);

        assert_eq!(ks.bits(65), Err(RandomError::InvalidBitCount { requested: 65 }));
        assert_eq!(ks.counter, 0);
    }

    #[test]
    fn words_come_in_block_order() {
        let mut ks = Keystream::new(KEY, NONCE);
        let first = chacha20::block(&KEY, NONCE, 0);
        let second = chacha20::block(&KEY, NONCE, 1);

        for &expected in first.iter().chain(second.iter()) {
            assert_eq!(ks.bits(32).unwrap(), u64::from(expected));
        }
        assert_eq!(ks.counter, 2);
    }

    #[test]
    fn wide_draw_puts_older_word_high() {
        let mut ks = Keystream::new(KEY, NONCE);
        let block = chacha20::block(&KEY, NONCE, 0);

        let expected = (u64::from(block[0]) << 32) | u64::from(block[1]);

        assert_eq!(ks.bits(64).unwrap(), expected);
        assert_eq!(ks.counter, 1);
        assert_eq!(ks.cursor, 2);
        assert_eq!(ks.available, 0);
    }

    #[test]
    fn single_bits_match_word_bits() {
        let mut ks = Keystream::new(KEY, NONCE);
        let word = chacha20::block(&KEY, NONCE, 0)[0];

        for i in 0..32 {
            assert_eq!(ks.bits(1).unwrap(), u64::from((word >> i) & 1));
        }
        assert_eq!(ks.available, 0);
        assert_eq!(ks.cursor, 1);
    }

    #[test]
    fn partial_draws_span_words() {
        let mut ks = Keystream::new(KEY, NONCE);
        let block = chacha20::block(&KEY, NONCE, 0);

        assert_eq!(ks.bits(20).unwrap(), u64::from(block[0] & 0xf_ffff));

        // 12 bits left from word 0, then 8 bits of word 1.
        let expected = (u64::from(block[0] >> 20) << 8) | u64::from(block[1] & 0xff);
        assert_eq!(ks.bits(20).unwrap(), expected);
        assert_eq!(ks.available, 24);
    }

    #[test]
    fn full_block_needs_one_refill() {
        let mut ks = Keystream::new(KEY, NONCE);

        for _ in 0..8 {
            ks.bits(64).unwrap();
        }
        assert_eq!(ks.counter, 1);

        ks.bits(1).unwrap();
        assert_eq!(ks.counter, 2);
    }

    #[test]
    fn wrap_is_fatal() {
        let mut ks = Keystream::new(KEY, NONCE);
        ks.seek_block(u64::MAX - 1);

        // Block u64::MAX - 1 is the last one served.
        for _ in 0..16 {
            ks.bits(32).unwrap();
        }
        assert_eq!(ks.counter, u64::MAX);

        assert_eq!(ks.bits(1), Err(RandomError::KeystreamExhausted));
        assert_eq!(ks.bits(64), Err(RandomError::KeystreamExhausted));

        // Requests served from buffered bits alone still need no refill.
        assert_eq!(ks.bits(0), Ok(0));
    }

    #[test]
    fn recycling_spends_close_to_the_minimum() {
        let mut ks = Keystream::new(KEY, NONCE);
        let mut sampler = Sampler::new();

        for _ in 0..100_000 {
            sampler.below(&mut ks, 17).unwrap();
        }

        // 100_000 * log2(17) is about 408_746 bits, or 798.3 blocks of 512 bits.
        assert!((798..=810).contains(&ks.counter), "generated {} blocks", ks.counter);
    }
}
