//! Stream identity and nonce derivation.
//!
//! A stream is identified by a problem label of at most four non-zero bytes
//! and a 32-bit test id. Both are folded into the 64-bit ChaCha20 nonce.
//!
//! The folding ORs label byte `i` in at bit offset `4 + i`, on top of the test
//! id bits. The offsets overlap and are not byte aligned; they are kept exactly
//! as they are because every previously generated test suite depends on them.
//! Changing the formula is a breaking change that requires regenerating all
//! existing test data.

use crate::error::RandomError;

/// Maximum length of a problem label, in bytes.
pub const MAX_LABEL_LEN: usize = 4;

/// Identity of one random stream: a problem label and a test id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamId {
    label: [u8; MAX_LABEL_LEN],
    label_len: usize,
    test_id: u32,
}

impl StreamId {
    /// Validates a problem label and pairs it with a test id.
    ///
    /// # Errors
    /// - [`RandomError::LabelTooLong`] if the label exceeds four bytes.
    /// - [`RandomError::ZeroByteInLabel`] if any label byte is zero.
    pub fn new(label: impl AsRef<[u8]>, test_id: u32) -> Result<Self, RandomError> {
        let bytes = label.as_ref();

        if bytes.len() > MAX_LABEL_LEN {
            return Err(RandomError::LabelTooLong { len: bytes.len() });
        }

        if let Some(position) = bytes.iter().position(|&b| b == 0) {
            return Err(RandomError::ZeroByteInLabel { position });
        }

        let mut label = [0u8; MAX_LABEL_LEN];
        label[..bytes.len()].copy_from_slice(bytes);

        Ok(Self {
            label,
            label_len: bytes.len(),
            test_id,
        })
    }

    /// The problem label bytes.
    pub fn label(&self) -> &[u8] {
        &self.label[..self.label_len]
    }

    /// The test id.
    pub fn test_id(&self) -> u32 {
        self.test_id
    }

    /// Derives the 64-bit ChaCha20 nonce for this stream.
    pub fn nonce(&self) -> u64 {
        self.label()
            .iter()
            .enumerate()
            .fold(u64::from(self.test_id), |nonce, (i, &byte)| {
                nonce | (u64::from(byte) << (4 + i))
            })
    }
}
