//! Finished digest values and the one-shot entry points.

use core::fmt;
use core::str::{FromStr, Utf8Error};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::compress::State;
use super::hasher::Hasher;
use crate::config::{DEFAULT_SECRET, DIGEST_SIZE};
use crate::ser::{decode_digest_hex, encode_hex, read_state, SerError};

/// Failure raised when an input cannot be treated as text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigestError {
    /// The named input was not valid UTF-8.
    #[error("{field} is not valid UTF-8: {source}")]
    InvalidInput {
        /// Which input was rejected (`message` or `secret`).
        field: &'static str,
        /// Decoder failure.
        #[source]
        source: Utf8Error,
    },
}

/// A finished 32-byte digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Digest {
    bytes: [u8; DIGEST_SIZE],
}

impl Digest {
    /// Wraps already serialized digest bytes.
    pub const fn from_bytes(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self { bytes }
    }

    /// Serializes a final chaining state.
    pub fn from_state(state: &State) -> Self {
        Self::from_bytes(state.to_bytes())
    }

    /// Parses a 64-character hexadecimal digest.
    pub fn from_hex(input: &str) -> Result<Self, SerError> {
        decode_digest_hex(input).map(Self::from_bytes)
    }

    /// Returns the serialized bytes.
    pub const fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.bytes
    }

    /// Size of the digest in bytes. Always [`DIGEST_SIZE`].
    pub const fn size(&self) -> usize {
        DIGEST_SIZE
    }

    /// Chaining words `a..h` the digest was serialized from.
    pub fn words(&self) -> [u32; 8] {
        // the layout is fixed-size, so this cannot fail for a constructed digest
        read_state(&self.bytes).unwrap_or_default()
    }

    /// Lowercase hexadecimal form, 64 characters.
    pub fn to_hex(&self) -> String {
        encode_hex(&self.bytes)
    }

    /// The `{ hash, size }` shape handed to front-ends.
    pub fn to_output(&self) -> DigestOutput {
        DigestOutput {
            hash: self.to_hex(),
            size: self.size(),
        }
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Digest> for [u8; DIGEST_SIZE] {
    fn from(digest: Digest) -> Self {
        digest.bytes
    }
}

impl From<Digest> for DigestOutput {
    fn from(digest: Digest) -> Self {
        digest.to_output()
    }
}

impl FromStr for Digest {
    type Err = SerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

/// Digest as exposed to callers: hex text plus byte size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestOutput {
    /// 64 lowercase hexadecimal characters.
    pub hash: String,
    /// Digest size in bytes.
    pub size: usize,
}

/// Digests raw message and secret bytes.
pub fn digest_bytes(message: &[u8], secret: &[u8]) -> Digest {
    let mut hasher = Hasher::new(secret);
    hasher.update(message);
    hasher.finalize()
}

/// Digests a text message under a text secret.
pub fn digest(message: &str, secret: &str) -> Digest {
    digest_bytes(message.as_bytes(), secret.as_bytes())
}

/// Digests a text message under [`DEFAULT_SECRET`].
pub fn digest_default(message: &str) -> Digest {
    digest(message, DEFAULT_SECRET)
}

/// Digests inputs that arrive as untrusted bytes and must be UTF-8 text.
pub fn try_digest_utf8(message: &[u8], secret: &[u8]) -> Result<Digest, DigestError> {
    let message = core::str::from_utf8(message).map_err(|source| DigestError::InvalidInput {
        field: "message",
        source,
    })?;
    let secret = core::str::from_utf8(secret).map_err(|source| DigestError::InvalidInput {
        field: "secret",
        source,
    })?;
    Ok(digest(message, secret))
}

/// Hex-encodes a final chaining state.
pub fn serialize(state: &State) -> String {
    Digest::from_state(state).to_hex()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{compress, mix, pad};

    const HELLO: &str = "8fa8c6561fe126ac9c39ca0ce76d823148657c88fda579c53a6895c0e391c129";

    #[test]
    fn hello_matches_dapp_output() {
        let digest = digest("Hello", DEFAULT_SECRET);
        assert_eq!(digest.to_hex(), HELLO);
        assert_eq!(digest_default("Hello"), digest);
        assert_eq!(digest.to_output(), DigestOutput { hash: HELLO.into(), size: 32 });
    }

    #[test]
    fn streaming_path_matches_explicit_pipeline() {
        let mixed = mix(b"Hello", DEFAULT_SECRET.as_bytes());
        let state = compress(&pad(&mixed)).unwrap();
        assert_eq!(serialize(&state), HELLO);
        assert_eq!(Digest::from_state(&state).words(), *state.words());
    }

    #[test]
    fn hex_round_trip_and_display() {
        let parsed: Digest = HELLO.to_uppercase().parse().unwrap();
        assert_eq!(parsed.to_string(), HELLO);
        assert_eq!(format!("{parsed:?}"), format!("Digest({HELLO})"));
        assert!(Digest::from_hex("00").is_err());
    }

    #[test]
    fn invalid_utf8_is_rejected_per_field() {
        let bad = [0xffu8, 0xfe];
        let err = try_digest_utf8(&bad, b"k").unwrap_err();
        assert!(matches!(err, DigestError::InvalidInput { field: "message", .. }));
        let err = try_digest_utf8(b"m", &bad).unwrap_err();
        assert!(matches!(err, DigestError::InvalidInput { field: "secret", .. }));
        assert!(err.to_string().starts_with("secret is not valid UTF-8"));

        let ok = try_digest_utf8("Hello".as_bytes(), DEFAULT_SECRET.as_bytes()).unwrap();
        assert_eq!(ok.to_hex(), HELLO);
    }
}
