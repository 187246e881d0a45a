use super::cursor::ByteReader;
use super::error::{SerKind, SerResult};

/// Encodes a `u32` in little-endian order.
pub fn write_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Encodes a `u64` as two little-endian `u32` words, low word first.
pub fn write_u64_split(out: &mut Vec<u8>, value: u64) {
    write_u32(out, (value & 0xffff_ffff) as u32);
    write_u32(out, (value >> 32) as u32);
}

/// Reads a `u32` in little-endian order.
pub fn read_u32(cursor: &mut ByteReader<'_>, kind: SerKind, field: &'static str) -> SerResult<u32> {
    let bytes = cursor.read_array::<4>(kind, field)?;
    Ok(u32::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_u64_writes_low_word_first() {
        let mut out = Vec::new();
        write_u64_split(&mut out, 0x0000_0001_0000_0018);
        assert_eq!(out, [0x18, 0, 0, 0, 1, 0, 0, 0]);

        let mut cursor = ByteReader::new(&out);
        assert_eq!(read_u32(&mut cursor, SerKind::Block, "low").unwrap(), 0x18);
        assert_eq!(read_u32(&mut cursor, SerKind::Block, "high").unwrap(), 1);
    }
}
