use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

use crate::error::{Result, RosterError};

/// One-way transform from a plaintext credential to its stored form.
///
/// The service treats this as opaque: hashes are produced exactly once per
/// submission and nothing in this crate ever reverses or compares them.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String>;
}

/// Argon2id hasher producing PHC-format strings with a fresh random salt per
/// call, so equal inputs still yield distinct outputs.
#[derive(Debug, Default)]
pub struct Argon2CredentialHasher {
    argon2: Argon2<'static>,
}

impl Argon2CredentialHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, plaintext: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| RosterError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    use super::*;

    #[test]
    fn produces_parseable_phc_string() {
        let hasher = Argon2CredentialHasher::new();
        let hash = hasher.hash("hunter2").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        PasswordHash::new(&hash).expect("valid PHC string");
    }

    #[test]
    fn output_differs_from_input() {
        let hasher = Argon2CredentialHasher::new();
        let hash = hasher.hash("hunter2").unwrap();

        assert_ne!(hash, "hunter2");
        assert!(!hash.contains("hunter2"));
    }

    #[test]
    fn salts_are_fresh_per_call() {
        let hasher = Argon2CredentialHasher::new();
        let first = hasher.hash("hunter2").unwrap();
        let second = hasher.hash("hunter2").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn hash_verifies_against_original_input() {
        let hasher = Argon2CredentialHasher::new();
        let hash = hasher.hash("hunter2").unwrap();

        let parsed = PasswordHash::new(&hash).unwrap();
        Argon2::default()
            .verify_password(b"hunter2", &parsed)
            .expect("hash should verify");
    }
}
