//! Polar webhook signature verification.
//!
//! Polar signs each webhook delivery with `HMAC-SHA256(secret, body)` and
//! sends the hex digest in the `Polar-Signature` header. Verification
//! recomputes the digest over the raw body and compares in constant time.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Verifier for Polar webhook signatures.
///
/// Malformed signature values (non-hex, odd length, empty) are treated as
/// unauthenticated; `verify` never fails with an error.
#[derive(Clone)]
pub struct SignatureVerifier {
    /// The webhook signing secret shared with Polar.
    secret: SecretString,
}

impl SignatureVerifier {
    /// Creates a new verifier with the given webhook secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
        }
    }

    /// Verifies a header-supplied signature against the raw request body.
    ///
    /// Returns `true` only when the supplied value is the hex digest of
    /// `HMAC-SHA256(secret, payload)`. Comparison is constant-time over the
    /// decoded digest bytes.
    pub fn verify(&self, payload: &[u8], signature: &str) -> bool {
        let provided = match hex_decode(signature.trim()) {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => return false,
        };

        let expected = self.compute_digest(payload);
        if expected.len() != provided.len() {
            return false;
        }

        expected.as_slice().ct_eq(&provided).into()
    }

    /// Hex digest of `HMAC-SHA256(secret, payload)`.
    ///
    /// The value Polar is expected to send for `payload`; used by callers
    /// generating deliveries against a known secret (e.g. test fixtures).
    pub fn expected_hex(&self, payload: &[u8]) -> String {
        hex_encode(&self.compute_digest(payload))
    }

    fn compute_digest(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key size");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

/// Decode a hex string to bytes.
fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }

    let mut bytes = Vec::with_capacity(hex.len() / 2);
    for i in (0..hex.len()).step_by(2) {
        let byte = u8::from_str_radix(&hex[i..i + 2], 16).ok()?;
        bytes.push(byte);
    }
    Some(bytes)
}

/// Encode bytes to hex string.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
