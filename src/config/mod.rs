//! Engine constants and runtime configuration.
//!
//! The constants below fix the digest space. Changing any of them produces a
//! different function and invalidates every hash already stored on chain, so
//! they are versioned together with the crate rather than exposed as settings.
//! The only runtime knob is the default secret used when a caller does not
//! supply one.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size in bytes of one compression block.
pub const BLOCK_SIZE: usize = 64;

/// Number of little-endian words read from every block.
pub const BLOCK_WORDS: usize = BLOCK_SIZE / 4;

/// Number of block words that feed the round functions. Words 8..16 are read
/// but never mixed into the state.
pub const ACTIVE_WORDS: usize = 8;

/// Offset inside the final block at which the bit length is written.
pub const LENGTH_OFFSET: usize = 56;

/// Size in bytes of the serialized digest.
pub const DIGEST_SIZE: usize = 32;

/// Length of the lowercase hexadecimal digest string.
pub const HEX_DIGEST_LEN: usize = DIGEST_SIZE * 2;

/// Number of 32-bit words in the chaining state.
pub const STATE_WORDS: usize = 8;

/// Initial chaining state `a..h`. Also the value added back after every block.
pub const INITIAL_STATE: [u32; STATE_WORDS] = [
    0x243f_6a88,
    0x85a3_08d3,
    0x1319_8a2e,
    0x0370_7344,
    0xa409_3822,
    0x299f_31d0,
    0x082e_fa98,
    0xec4e_6c89,
];

/// Additive constant for each of the eight round steps.
pub const ROUND_CONSTANTS: [u32; STATE_WORDS] = [
    0xd131_0ba6,
    0x98df_b5ac,
    0x2ffd_72db,
    0xd01a_dfb7,
    0xb8e1_afed,
    0x6a26_7e96,
    0xba7c_9045,
    0xf12c_7f99,
];

/// Left-rotation amount for each of the eight round steps.
pub const ROUND_ROTATIONS: [u32; STATE_WORDS] = [7, 11, 13, 17, 7, 11, 13, 17];

/// Rotation applied to the left half of the secret (positive = left).
pub const SECRET_LEFT_SHIFT: isize = 2;

/// Rotation applied to the right half of the secret (negative = right).
pub const SECRET_RIGHT_SHIFT: isize = -3;

/// Secret used by the dApp front-end when none is supplied.
pub const DEFAULT_SECRET: &str = "USER1_SECRET_KEY_ABC123==";

/// Environment variable overriding the configured secret.
pub const SECRET_ENV_VAR: &str = "UHV_SECRET";

/// Errors surfaced while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path:?}: {source}")]
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file was not valid JSON for [`DigestConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Runtime settings for the digest front-ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    /// Secret mixed into every message when the caller does not pass one.
    pub secret: String,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
        }
    }
}

impl DigestConfig {
    /// Creates a configuration with an explicit secret.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Parses a JSON document. Missing fields fall back to their defaults.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Applies [`SECRET_ENV_VAR`] on top of the current settings.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(std::env::var(SECRET_ENV_VAR).ok())
    }

    fn with_overrides(mut self, secret: Option<String>) -> Self {
        if let Some(secret) = secret {
            tracing::debug!(var = SECRET_ENV_VAR, "secret overridden from environment");
            self.secret = secret;
        }
        self
    }

    /// Returns the configured secret as bytes.
    pub fn secret_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}
