//! Keyed digest engine.
//!
//! The pipeline is
//! `message, secret -> mixed buffer -> padded stream -> 64-byte blocks ->
//! eight-word state -> 32-byte digest -> 64 hex characters`:
//!
//! * [`mix`] frames the message with the two rotated halves of the secret.
//! * [`padding`] appends the `0x80` sentinel, zero fill and the bit length.
//! * [`compress`] runs eight round steps per block with MD4/MD5 style
//!   nonlinear functions.
//! * [`digest`] serializes the state and exposes the top-level entry points.
//! * [`hasher`] performs the same computation incrementally.
//!
//! The construction is not collision or preimage resistant. It exists to
//! reproduce the digests already committed by the dApp, bit for bit. Only the
//! first eight words of each block reach the state and the feedback after each
//! block adds the initial constants rather than the previous state; both are
//! part of the digest definition.
//!
//! Every call is pure: no state survives between invocations, so digests may be
//! computed concurrently without coordination.

pub mod compress;
pub mod digest;
pub mod hasher;
pub mod mix;
pub mod padding;

pub use compress::{compress, RoundFunction, State};
pub use digest::{
    digest, digest_bytes, digest_default, serialize, try_digest_utf8, Digest, DigestError,
    DigestOutput,
};
pub use hasher::Hasher;
pub use mix::{circular_shift, mix, SecretFrame};
pub use padding::{append_padding, bit_length, block_count, pad, padded_len, PADDING_SENTINEL};
