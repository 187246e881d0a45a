//! Byte layouts shared by the digest engine.
//!
//! Every multi-byte value is little-endian: block words are read as sixteen
//! `u32` values, the length trailer is two `u32` words (low word first) and the
//! digest is the eight chaining words written in order `a..h`.

mod cursor;
mod digest;
mod error;
mod ints;

pub use cursor::ByteReader;
pub use digest::{
    block_words, decode_digest_hex, encode_hex, read_block_words, read_state, state_to_bytes,
};
pub use error::{SerError, SerKind, SerResult};
pub use ints::{read_u32, write_u32, write_u64_split};
