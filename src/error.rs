//! Error type for random stream construction and drawing.
//!
//! Every error describes a violated precondition detected at the call that
//! violated it. None of them are transient: retrying the same call cannot
//! succeed.

use thiserror::Error;

/// Errors reported by the random stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RandomError {
    /// The problem label is longer than four bytes.
    #[error("problem label is {len} bytes long, at most 4 are allowed")]
    LabelTooLong { len: usize },

    /// The problem label contains a zero byte.
    #[error("problem label contains a zero byte at position {position}")]
    ZeroByteInLabel { position: usize },

    /// More than 64 bits were requested in a single draw.
    #[error("cannot draw {requested} bits at once, at most 64 are allowed")]
    InvalidBitCount { requested: u32 },

    /// A ranged draw was requested with `min > max`.
    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: i128, max: i128 },

    /// The 64-bit block counter would wrap around.
    ///
    /// Continuing would repeat keystream, so the stream refuses to produce
    /// any further output.
    #[error("keystream exhausted: block counter would wrap around")]
    KeystreamExhausted,
}
