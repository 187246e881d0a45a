//! Caller-owned record of computed digests.
//!
//! The digest engine keeps no state between calls. Front-ends that want a
//! running log of what was hashed own a [`HashHistory`] and pass it to the
//! layer that records entries. Exports use the dApp's JSON layout (ISO 8601
//! timestamps, `executionTime` as a three-decimal string) so downloads made by
//! the front-end can be re-audited.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hash::{digest, SecretFrame};

mod format;

pub use format::format_iso;

/// Errors raised while exporting or importing a history document.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// JSON encoding or decoding failed.
    #[error("history document: {0}")]
    Json(#[from] serde_json::Error),
}

/// One digest computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashRecord {
    /// Wall-clock time of the computation. Exports keep millisecond precision.
    #[serde(with = "format::iso_millis", alias = "timestampMs")]
    pub timestamp: DateTime<Utc>,
    /// Message that was hashed.
    pub message: String,
    /// Secret used for the computation.
    pub secret: String,
    /// Lowercase hexadecimal digest.
    pub hash: String,
    /// Byte length of the mixed buffer (secret halves plus message).
    pub input_size: usize,
    /// Digest size in bytes.
    pub output_size: usize,
    /// Time spent computing the digest, in milliseconds.
    #[serde(
        rename = "executionTime",
        alias = "elapsedMs",
        with = "format::fixed_millis"
    )]
    pub elapsed_ms: f64,
}

/// Result of recomputing every recorded digest.
///
/// A record is valid when its stored hash equals the recomputed one. The
/// recorded sizes and timings are informational and not checked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntegrityReport {
    /// Records whose stored hash matches the recomputed one.
    pub valid: usize,
    /// Indices of records whose stored hash differs.
    pub corrupted: Vec<usize>,
}

impl IntegrityReport {
    /// Total number of records checked.
    pub fn total(&self) -> usize {
        self.valid + self.corrupted.len()
    }

    /// Whether no mismatch was found.
    pub fn is_clean(&self) -> bool {
        self.corrupted.is_empty()
    }

    /// Share of valid records in percent. An empty history is fully valid.
    pub fn percent_valid(&self) -> f64 {
        match self.total() {
            0 => 100.0,
            total => self.valid as f64 / total as f64 * 100.0,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryExport {
    #[serde(with = "format::iso_millis")]
    export_time: DateTime<Utc>,
    #[serde(default)]
    user_address: Option<String>,
    total_hashes: usize,
    history: Vec<HashRecord>,
}

/// Ordered list of [`HashRecord`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HashHistory {
    records: Vec<HashRecord>,
}

impl HashHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hashes `message`, appends the timed record and returns it.
    pub fn record(&mut self, message: &str, secret: &str) -> &HashRecord {
        let start = Instant::now();
        let output = digest(message, secret).to_output();
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        let input_size = SecretFrame::new(secret.as_bytes()).mixed_len(message.len());
        let record = HashRecord {
            timestamp: Utc::now(),
            message: message.to_string(),
            secret: secret.to_string(),
            hash: output.hash,
            input_size,
            output_size: output.size,
            elapsed_ms,
        };
        tracing::debug!(
            index = self.records.len(),
            input_size,
            elapsed_ms,
            "recorded digest"
        );
        self.push(record)
    }

    /// Appends an externally produced record.
    pub fn push(&mut self, record: HashRecord) -> &HashRecord {
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[HashRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops every record and returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        tracing::debug!(removed, "history cleared");
        removed
    }

    /// Recomputes every digest and reports records that no longer match.
    pub fn validate_integrity(&self) -> IntegrityReport {
        let mut report = IntegrityReport::default();
        for (index, record) in self.records.iter().enumerate() {
            let recomputed = digest(&record.message, &record.secret);
            if recomputed.to_hex() == record.hash {
                report.valid += 1;
            } else {
                tracing::warn!(
                    index,
                    stored = %record.hash,
                    recomputed = %recomputed,
                    "history record does not match"
                );
                report.corrupted.push(index);
            }
        }
        report
    }

    /// Serializes the history in the dApp's export layout.
    pub fn export_json(
        &self,
        exported_at: DateTime<Utc>,
        account: Option<&str>,
    ) -> Result<String, HistoryError> {
        let export = HistoryExport {
            export_time: exported_at,
            user_address: account.map(str::to_string),
            total_hashes: self.records.len(),
            history: self.records.clone(),
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }

    /// Reads a document produced by [`HashHistory::export_json`] or by the
    /// front-end's history download.
    pub fn import_json(input: &str) -> Result<Self, HistoryError> {
        let export: HistoryExport = serde_json::from_str(input)?;
        if export.total_hashes != export.history.len() {
            tracing::warn!(
                declared = export.total_hashes,
                actual = export.history.len(),
                "history export count mismatch"
            );
        }
        Ok(Self {
            records: export.history,
        })
    }
}

impl FromIterator<HashRecord> for HashHistory {
    fn from_iter<I: IntoIterator<Item = HashRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
