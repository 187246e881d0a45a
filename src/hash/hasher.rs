//! Incremental form of the digest pipeline.

use super::compress::State;
use super::digest::Digest;
use super::mix::SecretFrame;
use super::padding::{append_padding, bit_length};
use crate::config::BLOCK_SIZE;

/// Streaming keyed hasher.
///
/// The rotated left half of the secret is absorbed on construction, message
/// bytes are absorbed by [`Hasher::update`] and the rotated right half is
/// absorbed by [`Hasher::finalize`] before padding. Full blocks are compressed
/// as soon as they are available, so memory use stays at one block.
#[derive(Clone)]
pub struct Hasher {
    frame: SecretFrame,
    state: State,
    buffer: [u8; BLOCK_SIZE],
    buffered: usize,
    total_len: usize,
    blocks: usize,
}

impl Hasher {
    /// Creates a hasher keyed by `secret`.
    pub fn new(secret: &[u8]) -> Self {
        let frame = SecretFrame::new(secret);
        let mut hasher = Self {
            frame,
            state: State::new(),
            buffer: [0u8; BLOCK_SIZE],
            buffered: 0,
            total_len: 0,
            blocks: 0,
        };
        let prefix = hasher.frame.prefix().to_vec();
        hasher.absorb(&prefix);
        hasher
    }

    /// Absorbs message bytes.
    pub fn update(&mut self, bytes: &[u8]) -> &mut Self {
        self.absorb(bytes);
        self
    }

    /// Number of mixed-buffer bytes absorbed so far, secret prefix included.
    pub fn absorbed_len(&self) -> usize {
        self.total_len
    }

    /// Appends the secret suffix, pads and returns the digest.
    pub fn finalize(mut self) -> Digest {
        let suffix = self.frame.suffix().to_vec();
        self.absorb(&suffix);

        let mut tail = self.buffer[..self.buffered].to_vec();
        append_padding(&mut tail, bit_length(self.total_len));
        for chunk in tail.chunks_exact(BLOCK_SIZE) {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(chunk);
            self.state.absorb_block(&block);
            self.blocks += 1;
        }
        tracing::trace!(
            mixed_len = self.total_len,
            blocks = self.blocks,
            "digest finalized"
        );
        Digest::from_state(&self.state)
    }

    fn absorb(&mut self, mut bytes: &[u8]) {
        self.total_len += bytes.len();
        while !bytes.is_empty() {
            let take = (BLOCK_SIZE - self.buffered).min(bytes.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&bytes[..take]);
            self.buffered += take;
            bytes = &bytes[take..];
            if self.buffered == BLOCK_SIZE {
                let block = self.buffer;
                self.state.absorb_block(&block);
                self.blocks += 1;
                self.buffered = 0;
            }
        }
    }
}

// The buffer may hold secret bytes, so only sizes are printed.
impl core::fmt::Debug for Hasher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hasher")
            .field("absorbed_len", &self.total_len)
            .field("blocks", &self.blocks)
            .finish_non_exhaustive()
    }
}
