//! Secret/message mixing.
//!
//! The secret is split at `len / 2`; the left half is rotated left by two
//! positions and the right half rotated right by three. The message is placed
//! between them. This is the only step where the secret is used.

use crate::config::{SECRET_LEFT_SHIFT, SECRET_RIGHT_SHIFT};

/// Circular rotation of `bytes` by `shift` positions.
///
/// Positive shifts rotate left, negative shifts rotate right. The shift is
/// normalised with a euclidean remainder so both directions share one code
/// path. An empty slice is returned unchanged.
pub fn circular_shift(bytes: &[u8], shift: isize) -> Vec<u8> {
    let len = bytes.len();
    if len == 0 {
        return Vec::new();
    }
    // `len` fits in `isize` for any slice that exists in memory.
    let normalized = shift.rem_euclid(len as isize) as usize;
    let mut out = Vec::with_capacity(len);
    out.extend_from_slice(&bytes[normalized..]);
    out.extend_from_slice(&bytes[..normalized]);
    out
}

/// The two rotated secret halves framing a message.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretFrame {
    prefix: Vec<u8>,
    suffix: Vec<u8>,
}

impl SecretFrame {
    /// Splits and rotates `secret`.
    pub fn new(secret: &[u8]) -> Self {
        let (left, right) = secret.split_at(secret.len() / 2);
        Self {
            prefix: circular_shift(left, SECRET_LEFT_SHIFT),
            suffix: circular_shift(right, SECRET_RIGHT_SHIFT),
        }
    }

    /// Bytes placed before the message.
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Bytes placed after the message.
    pub fn suffix(&self) -> &[u8] {
        &self.suffix
    }

    /// Length of the mixed buffer for a message of `message_len` bytes.
    pub fn mixed_len(&self, message_len: usize) -> usize {
        self.prefix.len() + message_len + self.suffix.len()
    }
}

// Hand-written so the secret never lands in logs.
impl core::fmt::Debug for SecretFrame {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SecretFrame")
            .field("prefix_len", &self.prefix.len())
            .field("suffix_len", &self.suffix.len())
            .finish()
    }
}

/// Builds `rotate(left, 2) ++ message ++ rotate(right, -3)`.
pub fn mix(message: &[u8], secret: &[u8]) -> Vec<u8> {
    let frame = SecretFrame::new(secret);
    let mut out = Vec::with_capacity(frame.mixed_len(message.len()));
    out.extend_from_slice(frame.prefix());
    out.extend_from_slice(message);
    out.extend_from_slice(frame.suffix());
    out
}
