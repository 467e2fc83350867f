//! Acuity webhook signature verification.
//!
//! Acuity signs each delivery with HMAC-SHA256 over the raw request body,
//! keyed by the account API key, and sends the base64-encoded digest in the
//! `x-acuity-signature` header.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the base64-encoded HMAC-SHA256 signature for a webhook body.
pub fn compute_signature(secret: &str, body: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(body);
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Check a supplied signature header against the expected digest of `body`.
pub fn verify_signature(secret: &str, body: &[u8], provided: &str) -> bool {
    compute_signature(secret, body) == provided
}
