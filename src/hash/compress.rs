//! Block compression.
//!
//! Each 64-byte block is read as sixteen little-endian words, of which only the
//! first eight are used. Step `i` rewrites state word `i` from the four words
//! starting at `i` (wrapping), so later steps in a block observe the values
//! written by earlier ones. After the eight steps the initial constants, not the
//! pre-block state, are added back to every word.

use crate::config::{
    ACTIVE_WORDS, BLOCK_SIZE, BLOCK_WORDS, DIGEST_SIZE, INITIAL_STATE, ROUND_CONSTANTS, ROUND_ROTATIONS,
    STATE_WORDS,
};
use crate::ser::{
    block_words, read_block_words, state_to_bytes, ByteReader, SerError, SerKind, SerResult,
};

/// Nonlinear mixing function selected per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundFunction {
    /// Bitwise select: `(q & r) | (!q & s)`.
    Ff,
    /// Bitwise select on `s`: `(q & s) | (r & !s)`.
    Gg,
    /// Parity: `q ^ r ^ s`.
    Hh,
    /// `r ^ (q | !s)`.
    Ii,
}

impl RoundFunction {
    /// Functions applied by steps `0..8`.
    pub const SCHEDULE: [RoundFunction; STATE_WORDS] = [
        RoundFunction::Ff,
        RoundFunction::Gg,
        RoundFunction::Hh,
        RoundFunction::Ii,
        RoundFunction::Ff,
        RoundFunction::Gg,
        RoundFunction::Hh,
        RoundFunction::Ii,
    ];

    fn mix(self, q: u32, r: u32, s: u32) -> u32 {
        match self {
            RoundFunction::Ff => (q & r) | (!q & s),
            RoundFunction::Gg => (q & s) | (r & !s),
            RoundFunction::Hh => q ^ r ^ s,
            RoundFunction::Ii => r ^ (q | !s),
        }
    }

    /// Computes `rotl(p ^ f(q, r, s) ^ x ^ k, n) ^ q`.
    pub fn apply(self, [p, q, r, s]: [u32; 4], x: u32, rotation: u32, constant: u32) -> u32 {
        let t = p ^ self.mix(q, r, s) ^ x ^ constant;
        t.rotate_left(rotation) ^ q
    }
}

/// Running eight-word chaining state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    words: [u32; STATE_WORDS],
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    /// Fresh state holding [`INITIAL_STATE`].
    pub const fn new() -> Self {
        Self {
            words: INITIAL_STATE,
        }
    }

    /// Returns the words `a..h`.
    pub const fn words(&self) -> &[u32; STATE_WORDS] {
        &self.words
    }

    /// Runs the eight round steps over one block's words.
    pub fn absorb_words(&mut self, block: &[u32; BLOCK_WORDS]) {
        for step in 0..ACTIVE_WORDS {
            let inputs = [
                self.words[step],
                self.words[(step + 1) % STATE_WORDS],
                self.words[(step + 2) % STATE_WORDS],
                self.words[(step + 3) % STATE_WORDS],
            ];
            self.words[step] = RoundFunction::SCHEDULE[step].apply(
                inputs,
                block[step],
                ROUND_ROTATIONS[step],
                ROUND_CONSTANTS[step],
            );
        }
        for (word, initial) in self.words.iter_mut().zip(INITIAL_STATE) {
            *word = word.wrapping_add(initial);
        }
    }

    /// Compresses one raw 64-byte block.
    pub fn absorb_block(&mut self, block: &[u8; BLOCK_SIZE]) {
        self.absorb_words(&block_words(block));
    }

    /// Serialized 32-byte form of the state.
    pub fn to_bytes(&self) -> [u8; DIGEST_SIZE] {
        state_to_bytes(&self.words)
    }
}

/// Compresses a padded stream block by block.
///
/// Fails when `padded` is not a whole number of blocks.
pub fn compress(padded: &[u8]) -> SerResult<State> {
    if padded.len() % BLOCK_SIZE != 0 {
        return Err(SerError::invalid_length(SerKind::Block, "padded stream"));
    }
    let mut cursor = ByteReader::new(padded);
    let mut state = State::new();
    while cursor.remaining() > 0 {
        let words = read_block_words(&mut cursor)?;
        state.absorb_words(&words);
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::padding::pad;

    #[test]
    fn round_functions_match_reference_values() {
        let inputs = [1, 2, 3, 4];
        assert_eq!(RoundFunction::Ff.apply(inputs, 5, 7, 0xd131_0ba6), 0x9885_d26a);
        assert_eq!(RoundFunction::Gg.apply(inputs, 5, 11, 0x98df_b5ac), 0xfdad_5cc4);
        assert_eq!(RoundFunction::Hh.apply(inputs, 5, 13, 0x2ffd_72db), 0xae5b_45fd);
        assert_eq!(RoundFunction::Ii.apply(inputs, 5, 17, 0xd01a_dfb7), 0x4096_5fc8);
    }

    #[test]
    fn empty_payload_state() {
        let state = compress(&pad(b"")).unwrap();
        assert_eq!(
            state.words(),
            &[
                0xce6d_c730,
                0xc24c_4bb1,
                0x6651_8f32,
                0xe7f1_95bf,
                0x1ef3_d2da,
                0xdb2f_b4b6,
                0x9779_3032,
                0xe093_af6a,
            ]
        );
    }

    #[test]
    fn upper_half_of_block_is_ignored() {
        let mut block = [0x11u8; BLOCK_SIZE];
        let mut baseline = State::new();
        baseline.absorb_block(&block);

        for byte in block[32..].iter_mut() {
            *byte ^= 0xff;
        }
        let mut flipped = State::new();
        flipped.absorb_block(&block);
        assert_eq!(baseline, flipped);

        block[0] ^= 1;
        let mut changed = State::new();
        changed.absorb_block(&block);
        assert_ne!(baseline, changed);
    }

    #[test]
    fn second_block_sees_first_block_output() {
        let first = [0x01u8; BLOCK_SIZE];
        let second = [0x02u8; BLOCK_SIZE];

        let mut chained = State::new();
        chained.absorb_block(&first);
        let after_first = chained;
        chained.absorb_block(&second);

        let mut alone = State::new();
        alone.absorb_block(&second);
        assert_ne!(chained, alone);
        assert_ne!(chained, after_first);

        let mut stream = first.to_vec();
        stream.extend_from_slice(&second);
        assert_eq!(compress(&stream).unwrap(), chained);
    }

    #[test]
    fn misaligned_stream_is_rejected() {
        let err = compress(&[0u8; 65]).expect_err("not block aligned");
        assert_eq!(err, SerError::invalid_length(SerKind::Block, "padded stream"));
        assert_eq!(compress(&[]).unwrap(), State::new());
    }
}
