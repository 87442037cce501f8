//! Salted password hashing.
//!
//! The browser original stored and compared passwords in plaintext. Records
//! here carry a salted SHA-256 digest instead, encoded as
//! `<salt-hex>$<digest-hex>`, and verification compares digests in constant
//! time. There is no server to brute-force against, so a memory-hard KDF
//! would be over-engineering for a single-profile local store.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

const SALT_LEN: usize = 16;

/// A stored password credential.
///
/// Serializes as a single string so it occupies the `password` field of the
/// persisted user record.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hashes a plaintext password with a fresh random salt.
    #[must_use]
    pub fn new(plain: &str) -> Self {
        let salt: [u8; SALT_LEN] = rand::random();
        Self(encode(&salt, &digest(&salt, plain)))
    }

    /// Verifies a plaintext password against the stored credential.
    ///
    /// Returns `false` for malformed stored values rather than erroring;
    /// a credential that cannot be parsed can never match.
    #[must_use]
    pub fn verify(&self, plain: &str) -> bool {
        let Some((salt_hex, digest_hex)) = self.0.split_once('$') else {
            return false;
        };
        let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(digest_hex)) else {
            return false;
        };
        let computed = digest(&salt, plain);
        computed.ct_eq(&expected).into()
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

fn digest(salt: &[u8], plain: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(plain.as_bytes());
    hasher.finalize().to_vec()
}

fn encode(salt: &[u8], digest: &[u8]) -> String {
    format!("{}${}", hex::encode(salt), hex::encode(digest))
}
