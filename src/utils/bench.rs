//! In-process throughput measurement for the digest engine.

use std::hint::black_box;
use std::time::Instant;

use serde::Serialize;

use crate::hash::digest_bytes;

/// Per-message benchmark result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageTiming {
    /// Message length in bytes.
    pub message_len: usize,
    /// Mean wall time per digest in milliseconds.
    pub avg_ms: f64,
    /// Message bytes hashed per second. Zero for empty messages.
    pub throughput: f64,
}

/// Aggregate result of [`run_benchmark`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkReport {
    /// Iterations run per message.
    pub iterations: usize,
    /// One entry per benchmark message, in input order.
    pub results: Vec<MessageTiming>,
    /// Total wall time in milliseconds.
    pub total_ms: f64,
}

impl BenchmarkReport {
    /// Number of digests computed.
    pub fn total_hashes(&self) -> usize {
        self.results.len() * self.iterations
    }

    /// Mean time per digest in milliseconds.
    pub fn avg_ms_per_hash(&self) -> f64 {
        match self.total_hashes() {
            0 => 0.0,
            n => self.total_ms / n as f64,
        }
    }

    /// Digests per second over the whole run.
    pub fn hashes_per_second(&self) -> f64 {
        if self.total_ms > 0.0 {
            self.total_hashes() as f64 / self.total_ms * 1000.0
        } else {
            0.0
        }
    }
}

/// Probe messages covering short, long, symbol-heavy and empty input.
pub fn standard_messages() -> Vec<String> {
    vec![
        "Short message".to_string(),
        "This is a medium length message for testing hash performance and consistency across different input sizes.".to_string(),
        "This is a very long message that we will use to test the hash function performance with larger inputs. ".repeat(10),
        "Special characters: !@#$%^&*()_+-=[]{}|;':\",./<>?`~".to_string(),
        "Numbers: 1234567890".repeat(5),
        String::new(),
    ]
}

/// Digests each message `iterations` times and reports timings.
///
/// `iterations == 0` is treated as a single iteration.
pub fn run_benchmark<M: AsRef<[u8]>>(
    messages: &[M],
    secret: &[u8],
    iterations: usize,
) -> BenchmarkReport {
    let iterations = iterations.max(1);
    let mut results = Vec::with_capacity(messages.len());
    let mut total_ms = 0.0;

    for message in messages {
        let bytes = message.as_ref();
        let start = Instant::now();
        for _ in 0..iterations {
            black_box(digest_bytes(black_box(bytes), secret));
        }
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        let avg_ms = elapsed_ms / iterations as f64;
        let throughput = if avg_ms > 0.0 {
            bytes.len() as f64 / avg_ms * 1000.0
        } else {
            0.0
        };
        tracing::debug!(len = bytes.len(), avg_ms, throughput, "benchmarked message");
        results.push(MessageTiming {
            message_len: bytes.len(),
            avg_ms,
            throughput,
        });
        total_ms += elapsed_ms;
    }

    BenchmarkReport {
        iterations,
        results,
        total_ms,
    }
}
