//! Argon2 hashing for the admin password.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use press_core::ports::{AuthError, PasswordService};

/// Argon2id with the crate's default parameters. Hashes are PHC strings, so
/// `site-server hash-password` prints a hash for `ADMIN_PASSWORD_HASH`.
#[derive(Default)]
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verifies_only_original_password() {
        let service = Argon2PasswordService::new();
        let hash = service.hash("magazine-admin").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(service.verify("magazine-admin", &hash).unwrap());
        assert!(!service.verify("magazine-admin ", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let service = Argon2PasswordService::new();
        let result = service.verify("anything", "plaintext-not-a-hash");
        assert!(matches!(result, Err(AuthError::HashingError(_))));
    }
}
