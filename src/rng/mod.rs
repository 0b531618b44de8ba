//! Random stream module
//!
//! This module provides the reproducible random stream used to generate
//! contest test data.
//!
//! Data flows one way through its layers:
//!
//! - [`chacha20`]
//!   Stateless ChaCha20 block function keyed by a [`SecretKey`], with a
//!   64-bit nonce and a 64-bit block counter.
//!
//! - `identity`
//!   Folds the problem label and test id into the stream nonce.
//!
//! - `keystream`
//!   Owns the block counter and serves arbitrary-width bit requests from
//!   the keystream.
//!
//! - `sampler`
//!   Turns raw bits into exactly uniform bounded integers, recycling the
//!   randomness left over by each draw.
//!
//! - `random`
//!   The [`Random`] handle exposed to callers.

pub mod chacha20;
mod identity;
mod key;
mod keystream;
mod random;
mod sampler;

pub use identity::StreamId;
pub use key::{CONTEST_KEY, SecretKey};

/// Reproducible random stream.
///
/// This type is the primary entry point for drawing random values.
pub use random::{Random, UniformInt};
