use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Salt used when none is configured
pub const DEFAULT_PASSWORD_SALT: &str = "ld_static_salt_v1";

/// Deterministic salted SHA-256 password hasher.
///
/// Stored form is `{salt}${hex(sha256(salt || plaintext))}`. The salt is shared
/// by every account, so equal passwords produce equal hashes; a per-account
/// random salt with a slow KDF would be the production-grade replacement.
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    salt: String,
}

impl CredentialHasher {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    pub fn hash(&self, plaintext: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        hasher.update(plaintext.as_bytes());
        format!("{}${}", self.salt, hex::encode(hasher.finalize()))
    }

    /// Compare `hash(candidate)` against a stored hash in constant time
    pub fn verify(&self, candidate: &str, stored_hash: &str) -> bool {
        let computed = self.hash(candidate);
        computed.len() == stored_hash.len()
            && computed.as_bytes().ct_eq(stored_hash.as_bytes()).into()
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new(DEFAULT_PASSWORD_SALT)
    }
}
