//! Entropy-recycling range sampler
//!
//! Produces exactly uniform integers in `[0, n)` from keystream bits while
//! wasting as little entropy as possible.
//!
//! The sampler keeps a pair `(range, value)` with `0 <= value < range`:
//! a uniform value over `[0, range)` that has already been paid for but not
//! yet spent. Each draw:
//!
//! 1. tops `range` up to full 64-bit precision, shifting fresh bits into the
//!    low end of `value`,
//! 2. splits `[0, range)` into `range / n` whole groups of size `n` and one
//!    partial group of size `range % n`,
//! 3. accepts when `value` falls into a whole group: the position inside the
//!    group is the result, the group index is kept as the new state,
//! 4. otherwise keeps the position inside the partial group as the new state
//!    and starts over.
//!
//! Neither branch throws bits away, so the amortized cost of a draw
//! approaches `log2(n)` bits.

use super::keystream::Keystream;
use crate::error::RandomError;

/// Widths above this cannot always be served by the recycling loop.
const MAX_RECYCLED_WIDTH: u64 = 1 << 63;

/// Unspent randomness carried between draws.
pub(crate) struct Sampler {
    range: u64,
    value: u64,
}

impl Sampler {
    pub(crate) fn new() -> Self {
        Self { range: 1, value: 0 }
    }

    /// Draws a uniform value in `[0, n)`, `n >= 1`.
    pub(crate) fn below(&mut self, keystream: &mut Keystream, n: u64) -> Result<u64, RandomError> {
        debug_assert!(n >= 1);

        if n > MAX_RECYCLED_WIDTH {
            return Self::below_wide(keystream, n);
        }

        loop {
            // Top up precision. `range` is never 0, so `z` is at most 63.
            let z = self.range.leading_zeros();
            let fresh = keystream.bits(z)?;
            self.range <<= z;
            self.value = (self.value << z) | fresh;

            let num_groups = self.range / n;
            let small_group = self.range % n;

            let group = self.value / n;
            let in_group = self.value % n;

            if group < num_groups {
                self.range = num_groups;
                self.value = group;
                return Ok(in_group);
            }

            self.range = small_group;
            self.value = in_group;
        }
    }

    /// Plain rejection over whole 64-bit draws.
    ///
    /// After topping up, the retained range can be smaller than `n`, which
    /// would leave the recycling loop without a whole group to accept. The
    /// acceptance probability here is above 1/2.
    fn below_wide(keystream: &mut Keystream, n: u64) -> Result<u64, RandomError> {
        loop {
            let candidate = keystream.bits(64)?;
            if candidate < n {
                return Ok(candidate);
            }
        }
    }
}
