// SPDX-License-Identifier: MPL-2.0
//! Signed one-time tokens for registration and password recovery.
//!
//! A token is a CBOR-encoded claims payload authenticated with a keyed
//! BLAKE3 MAC. The wire form is `hex(payload).hex(mac)` so tokens survive
//! being pasted into links or stored on a user record. Verification checks
//! the MAC before touching the payload, then the purpose, then the expiry.

use crate::error::TokenError;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Tokens are valid for ten minutes from issuance.
pub const TOKEN_TTL_SECS: i64 = 60 * 10;

/// Context string for key derivation. Changing it invalidates every
/// outstanding token.
const KEY_CONTEXT: &str = "shopfront 2025-06-01 signed token v1";

/// What a token is allowed to authorize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenPurpose {
    /// Completes account registration.
    Join,
    /// Completes a password change.
    Recover,
}

/// The authenticated content of a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub purpose: TokenPurpose,
    /// Unix timestamp (seconds) after which the token is rejected.
    pub expires_at: i64,
}

/// An issued token in wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedToken(String);

impl SignedToken {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Rehydrates a token from its stored string form (no validation here;
    /// [`TokenSigner::verify`] does that).
    #[must_use]
    pub fn from_string(raw: String) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for SignedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues and verifies signed tokens under a key derived from the
/// application secret.
pub struct TokenSigner {
    key: [u8; 32],
}

impl TokenSigner {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            key: blake3::derive_key(KEY_CONTEXT, secret.as_bytes()),
        }
    }

    /// Issues a token for `email` expiring [`TOKEN_TTL_SECS`] from now.
    #[must_use]
    pub fn sign(&self, email: &str, purpose: TokenPurpose) -> SignedToken {
        self.sign_claims(&Claims {
            email: email.to_string(),
            purpose,
            expires_at: Utc::now().timestamp() + TOKEN_TTL_SECS,
        })
    }

    fn sign_claims(&self, claims: &Claims) -> SignedToken {
        let mut payload = Vec::new();
        ciborium::into_writer(claims, &mut payload).expect("claims serialize to CBOR");
        let mac = blake3::keyed_hash(&self.key, &payload);
        SignedToken(format!("{}.{}", hex_encode(&payload), mac.to_hex()))
    }

    /// Verifies a token and returns its claims.
    ///
    /// The MAC comparison goes through `blake3::Hash` equality, which is
    /// constant-time.
    pub fn verify(
        &self,
        token: &SignedToken,
        purpose: TokenPurpose,
    ) -> Result<Claims, TokenError> {
        let (payload_hex, mac_hex) = token.0.split_once('.').ok_or(TokenError::Malformed)?;
        let payload = hex_decode(payload_hex).ok_or(TokenError::Malformed)?;
        let given = blake3::Hash::from_hex(mac_hex).map_err(|_| TokenError::Malformed)?;

        if blake3::keyed_hash(&self.key, &payload) != given {
            return Err(TokenError::Tampered);
        }

        let claims: Claims =
            ciborium::from_reader(payload.as_slice()).map_err(|_| TokenError::Malformed)?;

        if claims.purpose != purpose {
            return Err(TokenError::WrongPurpose);
        }
        if claims.expires_at < Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

fn hex_decode(input: &str) -> Option<Vec<u8>> {
    if input.len() % 2 != 0 {
        return None;
    }
    (0..input.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(input.get(i..i + 2)?, 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new("test-secret")
    }

    #[test]
    fn sign_then_verify_returns_claims() {
        let token = signer().sign("user@example.com", TokenPurpose::Join);
        let claims = signer()
            .verify(&token, TokenPurpose::Join)
            .expect("fresh token verifies");
        assert_eq!(claims.email, "user@example.com");
        assert_eq!(claims.purpose, TokenPurpose::Join);
    }

    #[test]
    fn wrong_purpose_is_rejected() {
        let token = signer().sign("user@example.com", TokenPurpose::Join);
        let err = signer().verify(&token, TokenPurpose::Recover).unwrap_err();
        assert_eq!(err, TokenError::WrongPurpose);
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = signer().sign_claims(&Claims {
            email: "user@example.com".to_string(),
            purpose: TokenPurpose::Recover,
            expires_at: Utc::now().timestamp() - 1,
        });
        let err = signer().verify(&token, TokenPurpose::Recover).unwrap_err();
        assert_eq!(err, TokenError::Expired);
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let token = signer().sign("user@example.com", TokenPurpose::Join);
        let raw = token.as_str();
        // Flip one nibble in the payload half.
        let mut chars: Vec<char> = raw.chars().collect();
        chars[0] = if chars[0] == '0' { '1' } else { '0' };
        let tampered = SignedToken::from_string(chars.into_iter().collect());
        let err = signer().verify(&tampered, TokenPurpose::Join).unwrap_err();
        assert_eq!(err, TokenError::Tampered);
    }

    #[test]
    fn different_secret_cannot_verify() {
        let token = signer().sign("user@example.com", TokenPurpose::Join);
        let other = TokenSigner::new("other-secret");
        let err = other.verify(&token, TokenPurpose::Join).unwrap_err();
        assert_eq!(err, TokenError::Tampered);
    }

    #[test]
    fn garbage_is_malformed() {
        let err = signer()
            .verify(
                &SignedToken::from_string("not a token".to_string()),
                TokenPurpose::Join,
            )
            .unwrap_err();
        assert_eq!(err, TokenError::Malformed);

        let err = signer()
            .verify(
                &SignedToken::from_string("abc.def".to_string()),
                TokenPurpose::Join,
            )
            .unwrap_err();
        assert_eq!(err, TokenError::Malformed);
    }

    #[test]
    fn hex_round_trip() {
        let bytes = vec![0x00, 0x0f, 0xff, 0x42];
        assert_eq!(hex_decode(&hex_encode(&bytes)), Some(bytes));
    }

    #[test]
    fn hex_decode_rejects_odd_length_and_non_hex() {
        assert!(hex_decode("abc").is_none());
        assert!(hex_decode("zz").is_none());
    }
}
