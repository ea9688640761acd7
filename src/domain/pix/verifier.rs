//! Webhook signature verification.
//!
//! The gateway signs the JSON serialization of the payload with HMAC-SHA256
//! and delivers `sha256=<hex>` alongside it. Verification depends on
//! reproducing the sender's serialization byte-for-byte: a key-order or
//! whitespace difference breaks it. That constraint is inherited from the
//! upstream scheme, which applies no canonicalization; adding one here
//! would break compatibility with the real sender.

use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Signature scheme prefix carried on the wire.
const SIGNATURE_PREFIX: &str = "sha256=";

/// Verifier for gateway webhook signatures.
pub struct PixWebhookVerifier {
    /// Shared secret, the same one used for gateway API calls.
    secret: String,
}

impl PixWebhookVerifier {
    /// Creates a new verifier with the given signing secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Compute the expected `sha256=<hex>` signature for a payload.
    ///
    /// Returns `None` when the payload cannot be serialized.
    pub fn expected_signature<T: Serialize>(&self, payload: &T) -> Option<String> {
        let serialized = serde_json::to_string(payload).ok()?;
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes()).ok()?;
        mac.update(serialized.as_bytes());
        let digest = mac.finalize().into_bytes();
        Some(format!("{}{}", SIGNATURE_PREFIX, hex::encode(digest)))
    }

    /// Verify a supplied signature against the payload.
    ///
    /// Never panics or errors: every failure mode (unserializable payload,
    /// malformed or truncated signature, length mismatch) reduces to
    /// `false`. The comparison is constant-time; a plain equality check on
    /// secret-derived data would leak the expected signature byte-by-byte
    /// through timing.
    pub fn verify<T: Serialize>(&self, payload: &T, signature: &str) -> bool {
        let Some(expected) = self.expected_signature(payload) else {
            return false;
        };
        constant_time_compare(expected.as_bytes(), signature.as_bytes())
    }
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
