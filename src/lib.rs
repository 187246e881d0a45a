//! Keyed message digest used by the Universal Hash Verification dApp.
//!
//! A message stored on chain is committed to by a 32-byte digest computed from
//! the message and a shared secret. Anyone holding the secret can recompute the
//! digest locally and check that a claimed message matches what was stored.
//!
//! The crate is organised as follows:
//!
//! * [`hash`] – the digest engine (mixing, padding, compression, serialization)
//!   and a streaming [`Hasher`].
//! * [`ser`] – little-endian word layouts and hexadecimal parsing.
//! * [`config`] – fixed engine constants and the runtime [`DigestConfig`].
//! * [`verify`] – comparison against expected digests or a [`MessageStore`].
//! * [`history`] – a caller-owned log of computed digests with integrity audit
//!   and JSON export.
//! * [`utils`] – benchmark harness and batch hashing.
//!
//! The digest is **not** a secure hash; see [`hash`] for the details that make
//! it weaker than the designs it borrows from.

pub mod config;
pub mod hash;
pub mod history;
pub mod ser;
pub mod utils;
pub mod verify;

pub use config::{DigestConfig, DEFAULT_SECRET, DIGEST_SIZE};
pub use hash::{
    digest, digest_bytes, digest_default, try_digest_utf8, Digest, DigestError, DigestOutput,
    Hasher,
};
pub use history::{HashHistory, HashRecord, IntegrityReport};
pub use utils::{digest_many, run_benchmark};
pub use verify::{verify, InMemoryStore, MessageStore, Verification};
