// SPDX-License-Identifier: MPL-2.0
//! Salted password digests.
//!
//! Each digest carries its own random 32-byte salt; the salt doubles as the
//! BLAKE3 key so two users with the same password never share a digest.

use serde::{Deserialize, Serialize};

/// A stored password digest. Never contains the password itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordDigest {
    salt: [u8; 32],
    digest: [u8; 32],
}

impl PasswordDigest {
    /// Digests a password under a fresh random salt.
    ///
    /// # Panics
    ///
    /// Panics if the operating system fails to provide random bytes.
    /// This is extremely rare and typically indicates a critical system failure.
    #[must_use]
    pub fn create(password: &str) -> Self {
        let mut salt = [0u8; 32];
        getrandom::fill(&mut salt).expect("Failed to generate random salt");
        Self::with_salt(password, salt)
    }

    fn with_salt(password: &str, salt: [u8; 32]) -> Self {
        let digest = blake3::keyed_hash(&salt, password.as_bytes());
        Self {
            salt,
            digest: *digest.as_bytes(),
        }
    }

    /// Checks a password attempt against the stored digest (constant-time
    /// via `blake3::Hash` equality).
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        blake3::keyed_hash(&self.salt, password.as_bytes()) == blake3::Hash::from(self.digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_verifies() {
        let digest = PasswordDigest::create("hunter42");
        assert!(digest.verify("hunter42"));
    }

    #[test]
    fn wrong_password_fails() {
        let digest = PasswordDigest::create("hunter42");
        assert!(!digest.verify("hunter43"));
        assert!(!digest.verify(""));
    }

    #[test]
    fn same_password_twice_gets_different_salts() {
        let a = PasswordDigest::create("hunter42");
        let b = PasswordDigest::create("hunter42");
        assert_ne!(a, b);
        assert!(a.verify("hunter42"));
        assert!(b.verify("hunter42"));
    }

    #[test]
    fn digest_round_trips_through_cbor() {
        let digest = PasswordDigest::create("secret-password");
        let mut buf = Vec::new();
        ciborium::into_writer(&digest, &mut buf).expect("serialize");
        let loaded: PasswordDigest = ciborium::from_reader(buf.as_slice()).expect("deserialize");
        assert_eq!(digest, loaded);
        assert!(loaded.verify("secret-password"));
    }
}
