//! Plane webhook signature verification using HMAC-SHA256.
//!
//! Plane signs webhook payloads with HMAC-SHA256 keyed by a shared secret and
//! sends the hex digest in the `X-Plane-Signature` header. Verification is the
//! first step in webhook processing; invalid signatures are rejected before
//! the body is parsed.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Computes the hex-encoded HMAC-SHA256 signature of a payload.
///
/// Used by tests to produce the header value Plane would send.
pub fn compute_signature(secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a Plane webhook signature against the raw body and secret.
///
/// Returns `false` when the header is absent, empty, or not valid hex.
/// Uses a constant-time comparison to prevent timing attacks.
pub fn verify_signature(secret: &str, body: &[u8], provided_hex: Option<&str>) -> bool {
    let provided_hex = match provided_hex {
        Some(value) if !value.is_empty() => value,
        _ => return false,
    };

    let provided = match hex::decode(provided_hex) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(body);

    // Constant-time comparison via the HMAC library
    mac.verify_slice(&provided).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmodified_body_verifies_against_itself() {
        let secret = "It's a Secret to Everybody";
        let body = b"Hello, World!";

        let sig = compute_signature(secret, body);
        assert!(verify_signature(secret, body, Some(&sig)));
    }

    #[test]
    fn single_bit_mutation_fails() {
        let secret = "shared-secret";
        let body = b"{\"event\":\"issue\"}".to_vec();
        let sig = compute_signature(secret, &body);

        let mut mutated = body.clone();
        mutated[0] ^= 0x01;
        assert!(verify_signature(secret, &body, Some(&sig)));
        assert!(!verify_signature(secret, &mutated, Some(&sig)));
    }

    #[test]
    fn absent_or_empty_header_fails() {
        assert!(!verify_signature("secret", b"body", None));
        assert!(!verify_signature("secret", b"body", Some("")));
    }

    #[test]
    fn malformed_header_fails_without_panicking() {
        assert!(!verify_signature("secret", b"body", Some("not-hex")));
        assert!(!verify_signature("secret", b"body", Some("abc")));
        assert!(!verify_signature("secret", b"body", Some("sha256=deadbeef")));
    }

    #[test]
    fn wrong_secret_fails() {
        let body = b"payload";
        let sig = compute_signature("right-secret", body);
        assert!(!verify_signature("wrong-secret", body, Some(&sig)));
    }

    #[test]
    fn empty_body_and_empty_secret_still_roundtrip() {
        let sig = compute_signature("", b"");
        assert!(verify_signature("", b"", Some(&sig)));
    }
}
