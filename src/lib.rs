//! Reproducible random streams for contest test generation
//!
//! This crate provides a deterministic random-number stream for building
//! randomized test data. A stream is fully determined by a secret key, a short
//! problem label and a test identifier: the same triple always yields the same
//! sequence, bit for bit, on every platform.
//!
//! The focus is on **exactness and reproducibility** rather than on a large
//! distribution catalogue. Ranged integers are exactly uniform and shuffles are
//! exactly uniform permutations.
//!
//! # Module overview
//!
//! - `error`
//!   The single error type shared by every fallible operation.
//!
//! - `rng`
//!   The random stream itself, built in layers:
//!   - a ChaCha20 block function producing 64-byte keystream blocks,
//!   - stream identity (problem label + test id) folded into a 64-bit nonce,
//!   - a bit reservoir serving requests of any width up to 64 bits without
//!     wasting keystream,
//!   - an entropy-recycling range sampler that carries unspent randomness
//!     from one draw to the next,
//!   - a Fisher–Yates shuffle on top of the sampler.
//!
//! # Example
//!
//! ```
//! use contest_rng::Random;
//!
//! let mut random = Random::new("tree", 7)?;
//!
//! let n = random.uniform(1u32, 200_000)?;
//! let mut order: Vec<u32> = (1..=n).collect();
//! random.shuffle(&mut order)?;
//! # Ok::<(), contest_rng::RandomError>(())
//! ```
//!
//! # Design goals
//!
//! - No heap allocations in the stream
//! - Minimal and explicit APIs
//! - Stable, well-defined output for a given key, label and test id
//!
//! The stream is not meant for concurrent use: a [`Random`] is ordinary
//! mutable state owned by exactly one caller.

pub mod error;
pub mod rng;

pub use error::RandomError;
pub use rng::{CONTEST_KEY, Random, SecretKey, StreamId, UniformInt};
