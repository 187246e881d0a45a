//! Merkle–Damgård padding.

use crate::config::{BLOCK_SIZE, LENGTH_OFFSET};
use crate::ser::write_u64_split;

/// Sentinel byte appended directly after the payload.
pub const PADDING_SENTINEL: u8 = 0x80;

/// Appends the sentinel, zero fill and the 64-bit bit length.
///
/// `out` may hold either the whole payload or only its trailing partial block;
/// the fill only depends on `out.len() % BLOCK_SIZE`, which is the same in both
/// cases. `bit_len` must describe the whole payload.
pub fn append_padding(out: &mut Vec<u8>, bit_len: u64) {
    out.push(PADDING_SENTINEL);
    let fill = (LENGTH_OFFSET + BLOCK_SIZE - out.len() % BLOCK_SIZE) % BLOCK_SIZE;
    out.resize(out.len() + fill, 0);
    write_u64_split(out, bit_len);
}

/// Pads `buffer` to a multiple of [`BLOCK_SIZE`] bytes.
pub fn pad(buffer: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(padded_len(buffer.len()));
    out.extend_from_slice(buffer);
    append_padding(&mut out, bit_length(buffer.len()));
    out
}

/// Bit length of a payload, as recorded in the trailer.
pub fn bit_length(byte_len: usize) -> u64 {
    (byte_len as u64).wrapping_mul(8)
}

/// Length of the padded stream for a payload of `byte_len` bytes.
pub fn padded_len(byte_len: usize) -> usize {
    block_count(byte_len) * BLOCK_SIZE
}

/// Number of blocks the padded stream will contain.
pub fn block_count(byte_len: usize) -> usize {
    // one sentinel byte plus eight length bytes must fit after the payload
    (byte_len + 1 + 8).div_ceil(BLOCK_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_payload_fits_one_block() {
        let padded = pad(b"msg");
        assert_eq!(padded.len(), 64);
        assert_eq!(&padded[..4], &[b'm', b's', b'g', 0x80]);
        assert!(padded[4..56].iter().all(|b| *b == 0));
        assert_eq!(&padded[56..], &[0x18, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn empty_payload_is_one_block() {
        let padded = pad(b"");
        assert_eq!(padded.len(), 64);
        assert_eq!(padded[0], 0x80);
        assert!(padded[1..].iter().all(|b| *b == 0));
    }

    #[test]
    fn boundary_lengths() {
        assert_eq!(pad(&[0xaa; 55]).len(), 64);
        assert_eq!(pad(&[0xaa; 56]).len(), 128);
        assert_eq!(pad(&[0xaa; 64]).len(), 128);
        assert_eq!(pad(&[0xaa; 119]).len(), 128);
        assert_eq!(pad(&[0xaa; 120]).len(), 192);
        for len in [0usize, 55, 56, 63, 64, 119, 120, 1000] {
            assert_eq!(padded_len(len), pad(&vec![1u8; len]).len(), "len {len}");
        }
    }

    #[test]
    fn trailer_only_padding_matches_full_padding() {
        let payload = vec![7u8; 150];
        let mut tail = payload[128..].to_vec();
        append_padding(&mut tail, bit_length(payload.len()));
        assert_eq!(&pad(&payload)[128..], tail.as_slice());
    }
}
