//! Reproducible random stream handle.
//!
//! A [`Random`] owns one stream position. It is neither `Clone`
//! nor `Copy`: two copies would emit the same values, silently correlating
//! test data that is supposed to be independent. Moving a `Random` transfers
//! the stream position along with it.
//!
//! ```compile_fail
//! let random = contest_rng::Random::new("a", 1).unwrap();
//! let copy = random.clone();
//! ```

use tracing::debug;

use super::identity::StreamId;
use super::key::{CONTEST_KEY, SecretKey};
use super::keystream::Keystream;
use super::sampler::Sampler;
use crate::error::RandomError;

/// Reproducible random stream.
///
/// The output is a pure function of the secret key, the problem label and the
/// test id, and of the sequence of calls made on the stream. Every call picks
/// up the keystream exactly where the previous one left off.
pub struct Random {
    keystream: Keystream,
    sampler: Sampler,
}

impl Random {
    /// Opens the stream for `(label, test_id)` under [`CONTEST_KEY`].
    ///
    /// # Errors
    /// Fails if the label is longer than four bytes or contains a zero byte.
    pub fn new(label: impl AsRef<[u8]>, test_id: u32) -> Result<Self, RandomError> {
        let id = StreamId::new(label, test_id)?;
        Ok(Self::with_key(CONTEST_KEY, id))
    }

    /// Opens the stream for `id` under an explicit key.
    pub fn with_key(key: SecretKey, id: StreamId) -> Self {
        let nonce = id.nonce();

        debug!(
            label = %String::from_utf8_lossy(id.label()),
            test_id = id.test_id(),
            nonce,
            "opened random stream"
        );

        Self {
            keystream: Keystream::new(key, nonce),
            sampler: Sampler::new(),
        }
    }

    /// Returns `n` fresh random bits, `0 <= n <= 64`.
    ///
    /// `bits(0)` returns 0 without consuming any keystream.
    ///
    /// # Errors
    /// - [`RandomError::InvalidBitCount`] if `n > 64`.
    /// - [`RandomError::KeystreamExhausted`] if the stream has run out.
    pub fn bits(&mut self, n: u32) -> Result<u64, RandomError> {
        self.keystream.bits(n)
    }

    /// Returns 32 fresh random bits.
    pub fn next_u32(&mut self) -> Result<u32, RandomError> {
        Ok(self.bits(32)? as u32)
    }

    /// Returns 64 fresh random bits.
    pub fn next_u64(&mut self) -> Result<u64, RandomError> {
        self.bits(64)
    }

    /// Returns an integer uniformly distributed over `[min, max]`.
    ///
    /// This is the canonical ranged draw; every other integer width goes
    /// through it. A one-value range still tops up the retained randomness,
    /// so it advances the stream like any other width.
    ///
    /// # Errors
    /// - [`RandomError::InvalidRange`] if `min > max`.
    /// - [`RandomError::KeystreamExhausted`] if the stream has run out.
    pub fn uniform_u64(&mut self, min: u64, max: u64) -> Result<u64, RandomError> {
        if min > max {
            return Err(RandomError::InvalidRange {
                min: i128::from(min),
                max: i128::from(max),
            });
        }

        let span = max - min;
        if span == u64::MAX {
            return self.bits(64);
        }

        let offset = self.sampler.below(&mut self.keystream, span + 1)?;
        Ok(min + offset)
    }

    /// Returns an integer of any primitive type uniformly distributed over
    /// `[min, max]`.
    ///
    /// # Errors
    /// - [`RandomError::InvalidRange`] if `min > max`.
    /// - [`RandomError::KeystreamExhausted`] if the stream has run out.
    pub fn uniform<T: UniformInt>(&mut self, min: T, max: T) -> Result<T, RandomError> {
        if min > max {
            return Err(RandomError::InvalidRange {
                min: min.to_i128(),
                max: max.to_i128(),
            });
        }

        let offset = self.uniform_u64(0, T::span(min, max))?;
        Ok(T::offset(min, offset))
    }

    /// Shuffles `items` into a uniformly random permutation.
    ///
    /// Forward Fisher–Yates: position `i` is swapped with a uniform position
    /// in `[0, i]`.
    pub fn shuffle<T>(&mut self, items: &mut [T]) -> Result<(), RandomError> {
        for i in 1..items.len() {
            let j = self.uniform(0, i)?;
            items.swap(i, j);
        }

        Ok(())
    }
}

/// Primitive integers accepted by [`Random::uniform`].
///
/// Implementations map `[min, max]` onto `[0, max - min]` in `u64`, so signed
/// ranges never overflow at the extremes of their domain.
pub trait UniformInt: Copy + PartialOrd + sealed::Sealed {
    /// `max - min` as an unsigned 64-bit value. Requires `min <= max`.
    fn span(min: Self, max: Self) -> u64;

    /// `min + offset`, for `offset <= span(min, max)`.
    fn offset(min: Self, offset: u64) -> Self;

    /// Lossless widening, used in error reports.
    fn to_i128(self) -> i128;
}

mod sealed {
    pub trait Sealed {}
}

macro_rules! impl_uniform_int {
    ($($t:ty => $u:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl UniformInt for $t {
                #[inline]
                fn span(min: Self, max: Self) -> u64 {
                    (max as $u).wrapping_sub(min as $u) as u64
                }

                #[inline]
                fn offset(min: Self, offset: u64) -> Self {
                    min.wrapping_add(offset as $u as $t)
                }

                #[inline]
                fn to_i128(self) -> i128 {
                    self as i128
                }
            }
        )*
    };
}

impl_uniform_int! {
    u8 => u8,
    u16 => u16,
    u32 => u32,
    u64 => u64,
    usize => usize,
    i8 => u8,
    i16 => u16,
    i32 => u32,
    i64 => u64,
    isize => usize,
}

#[cfg(feature = "rand_core")]
mod rand_core_impl {
    //! Lets the stream drive the `rand` ecosystem's distributions.
    //!
    //! `RngCore`'s word methods cannot fail, so they panic once the stream
    //! is exhausted. `try_fill_bytes` reports the error instead.

    use core::num::NonZeroU32;

    use rand_core::{Error, RngCore};

    use super::Random;
    use crate::error::RandomError;

    const EXHAUSTED: &str = "contest_rng: keystream exhausted";

    impl Random {
        fn fill_from_words(&mut self, dest: &mut [u8]) -> Result<(), RandomError> {
            let mut chunks = dest.chunks_exact_mut(4);

            for chunk in &mut chunks {
                chunk.copy_from_slice(&Random::next_u32(self)?.to_le_bytes());
            }

            let tail = chunks.into_remainder();
            if !tail.is_empty() {
                let word = Random::next_u32(self)?.to_le_bytes();
                tail.copy_from_slice(&word[..tail.len()]);
            }

            Ok(())
        }
    }

    impl RngCore for Random {
        fn next_u32(&mut self) -> u32 {
            match Random::next_u32(self) {
                Ok(word) => word,
                Err(_) => panic!("{EXHAUSTED}"),
            }
        }

        fn next_u64(&mut self) -> u64 {
            match Random::next_u64(self) {
                Ok(word) => word,
                Err(_) => panic!("{EXHAUSTED}"),
            }
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            if self.fill_from_words(dest).is_err() {
                panic!("{EXHAUSTED}");
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
            self.fill_from_words(dest).map_err(|_| {
                let code = NonZeroU32::new(Error::CUSTOM_START)
                    .unwrap_or(NonZeroU32::MIN);
                Error::from(code)
            })
        }
    }
}
