use super::cursor::ByteReader;
use super::error::{SerError, SerKind, SerResult};
use super::ints::read_u32;
use crate::config::{BLOCK_SIZE, BLOCK_WORDS, DIGEST_SIZE, HEX_DIGEST_LEN, STATE_WORDS};

/// Splits one block into its sixteen little-endian words.
pub fn block_words(block: &[u8; BLOCK_SIZE]) -> [u32; BLOCK_WORDS] {
    let mut words = [0u32; BLOCK_WORDS];
    for (word, chunk) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    words
}

/// Reads the next block from a padded stream and returns its words.
pub fn read_block_words(cursor: &mut ByteReader<'_>) -> SerResult<[u32; BLOCK_WORDS]> {
    let block = cursor.read_array::<BLOCK_SIZE>(SerKind::Block, "block")?;
    Ok(block_words(&block))
}

/// Serializes the chaining state into the 32-byte digest layout.
pub fn state_to_bytes(state: &[u32; STATE_WORDS]) -> [u8; DIGEST_SIZE] {
    let mut out = [0u8; DIGEST_SIZE];
    for (chunk, word) in out.chunks_exact_mut(4).zip(state) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    out
}

/// Recovers the chaining words from a serialized digest.
pub fn read_state(bytes: &[u8]) -> SerResult<[u32; STATE_WORDS]> {
    if bytes.len() != DIGEST_SIZE {
        return Err(SerError::invalid_length(SerKind::Digest, "state"));
    }
    let mut cursor = ByteReader::new(bytes);
    let mut state = [0u32; STATE_WORDS];
    for word in state.iter_mut() {
        *word = read_u32(&mut cursor, SerKind::Digest, "state word")?;
    }
    Ok(state)
}

/// Lowercase hexadecimal encoding, two characters per byte.
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Parses a 64-character hexadecimal digest. Either letter case is accepted.
pub fn decode_digest_hex(input: &str) -> SerResult<[u8; DIGEST_SIZE]> {
    let input = input.trim();
    if input.len() != HEX_DIGEST_LEN {
        return Err(SerError::invalid_length(SerKind::Digest, "hex"));
    }
    let mut out = [0u8; DIGEST_SIZE];
    hex::decode_to_slice(input, &mut out)
        .map_err(|_| SerError::invalid_value(SerKind::Digest, "hex"))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_bytes_are_little_endian() {
        let state = [0x0403_0201, 0, 0, 0, 0, 0, 0, 0xffee_ddcc];
        let bytes = state_to_bytes(&state);
        assert_eq!(&bytes[..4], &[1, 2, 3, 4]);
        assert_eq!(&bytes[28..], &[0xcc, 0xdd, 0xee, 0xff]);

        assert_eq!(read_state(&bytes).unwrap(), state);
    }

    #[test]
    fn read_state_rejects_short_input() {
        let err = read_state(&[0u8; 31]).expect_err("31 bytes");
        assert_eq!(err, SerError::invalid_length(SerKind::Digest, "state"));
        assert_eq!(err.kind(), SerKind::Digest);
        assert_eq!(err.to_string(), "invalid length for digest state");
    }

    #[test]
    fn block_words_cover_all_sixteen() {
        let mut block = [0u8; BLOCK_SIZE];
        for (i, byte) in block.iter_mut().enumerate() {
            *byte = i as u8;
        }
        let words = block_words(&block);
        assert_eq!(words[0], 0x0302_0100);
        assert_eq!(words[15], 0x3f3e_3d3c);

        let mut cursor = ByteReader::new(&block);
        assert_eq!(read_block_words(&mut cursor).unwrap(), words);
        assert_eq!(cursor.remaining(), 0);
        let err = read_block_words(&mut cursor).expect_err("stream exhausted");
        assert!(matches!(err, SerError::UnexpectedEnd { .. }));
        assert_eq!(err.kind(), SerKind::Block);
    }

    #[test]
    fn hex_decoding_accepts_uppercase_and_rejects_junk() {
        let lower = "00ff".repeat(16);
        let bytes = decode_digest_hex(&lower.to_uppercase()).unwrap();
        assert_eq!(encode_hex(&bytes), lower);

        assert_eq!(
            decode_digest_hex("abcd").unwrap_err(),
            SerError::invalid_length(SerKind::Digest, "hex")
        );
        assert_eq!(
            decode_digest_hex(&"zz".repeat(32)).unwrap_err(),
            SerError::invalid_value(SerKind::Digest, "hex")
        );
    }
}
