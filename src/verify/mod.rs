//! Local verification of claimed messages.
//!
//! The message store (a contract in production) only ever holds plain text.
//! Verification recomputes digests on this side and compares them; nothing
//! derived from the secret is written back to the store.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hash::{digest, Digest};

/// Failure reported by a [`MessageStore`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Nothing has been written yet.
    #[error("no message stored")]
    Empty,
    /// The backing store refused or failed the call.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Acknowledgement returned after a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Identifier of the write (a transaction hash on chain).
    pub transaction_id: String,
    /// Position of the write in the store's history (a block number on chain).
    pub sequence: u64,
}

/// Read/write access to the single stored message.
pub trait MessageStore {
    /// Returns the currently stored message.
    fn read_stored_message(&self) -> Result<String, StoreError>;

    /// Replaces the stored message.
    fn write_message(&mut self, text: &str) -> Result<Receipt, StoreError>;
}

/// Process-local store keeping every write.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    writes: Vec<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages written so far, oldest first.
    pub fn writes(&self) -> &[String] {
        &self.writes
    }
}

impl MessageStore for InMemoryStore {
    fn read_stored_message(&self) -> Result<String, StoreError> {
        self.writes.last().cloned().ok_or(StoreError::Empty)
    }

    fn write_message(&mut self, text: &str) -> Result<Receipt, StoreError> {
        self.writes.push(text.to_string());
        let sequence = self.writes.len() as u64;
        Ok(Receipt {
            transaction_id: format!("local-{sequence}"),
            sequence,
        })
    }
}

/// Outcome of comparing a recomputed digest against an expected one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// Whether both digests are equal.
    pub matched: bool,
    /// Digest of the candidate message.
    pub computed: Digest,
    /// Expected digest, if it could be parsed.
    pub expected: Option<Digest>,
}

/// Recomputes the digest of `message` and compares it with `expected_hex`.
///
/// Malformed `expected_hex` never matches.
pub fn verify(message: &str, secret: &str, expected_hex: &str) -> Verification {
    let computed = digest(message, secret);
    let expected = Digest::from_hex(expected_hex).ok();
    let matched = expected == Some(computed);
    tracing::debug!(matched, parsed = expected.is_some(), "verified against expected hash");
    Verification {
        matched,
        computed,
        expected,
    }
}

/// Compares a candidate message against the message currently in `store`.
pub fn verify_against_store<S: MessageStore + ?Sized>(
    store: &S,
    message: &str,
    secret: &str,
) -> Result<Verification, StoreError> {
    let stored = store.read_stored_message()?;
    let expected = digest(&stored, secret);
    let computed = digest(message, secret);
    let matched = computed == expected;
    tracing::debug!(matched, "verified against stored message");
    Ok(Verification {
        matched,
        computed,
        expected: Some(expected),
    })
}

/// Writes `message` to the store and returns the receipt with the digest to show.
pub fn commit_message<S: MessageStore + ?Sized>(
    store: &mut S,
    message: &str,
    secret: &str,
) -> Result<(Receipt, Digest), StoreError> {
    let digest = digest(message, secret);
    let receipt = store.write_message(message)?;
    tracing::debug!(sequence = receipt.sequence, hash = %digest, "message committed");
    Ok((receipt, digest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SECRET;

    const HELLO: &str = "8fa8c6561fe126ac9c39ca0ce76d823148657c88fda579c53a6895c0e391c129";

    #[test]
    fn verify_accepts_matching_hash() {
        let outcome = verify("Hello", DEFAULT_SECRET, HELLO);
        assert!(outcome.matched);
        assert_eq!(outcome.expected, Some(outcome.computed));
    }

    #[test]
    fn verify_rejects_other_message_and_garbage() {
        assert!(!verify("Hello!", DEFAULT_SECRET, HELLO).matched);
        let outcome = verify("Hello", DEFAULT_SECRET, "not-hex");
        assert!(!outcome.matched);
        assert!(outcome.expected.is_none());
    }

    #[test]
    fn store_round_trip() {
        let mut store = InMemoryStore::new();
        assert_eq!(store.read_stored_message(), Err(StoreError::Empty));
        assert_eq!(
            verify_against_store(&store, "Hello", DEFAULT_SECRET),
            Err(StoreError::Empty)
        );

        let (receipt, digest) = commit_message(&mut store, "Hello", DEFAULT_SECRET).unwrap();
        assert_eq!(receipt.sequence, 1);
        assert_eq!(digest.to_hex(), HELLO);
        assert_eq!(store.writes(), ["Hello".to_string()]);

        assert!(verify_against_store(&store, "Hello", DEFAULT_SECRET).unwrap().matched);
        assert!(!verify_against_store(&store, "hello", DEFAULT_SECRET).unwrap().matched);
        // a different secret still matches because both sides use it
        assert!(verify_against_store(&store, "Hello", "other").unwrap().matched);
    }

    #[test]
    fn dyn_store_is_usable() {
        let mut store: Box<dyn MessageStore> = Box::new(InMemoryStore::new());
        let (receipt, _) = commit_message(store.as_mut(), "a", "k").unwrap();
        assert_eq!(receipt.transaction_id, "local-1");
        assert!(verify_against_store(store.as_ref(), "a", "k").unwrap().matched);
    }
}
