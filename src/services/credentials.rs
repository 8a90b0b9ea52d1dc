//! Password hashing and verification

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
};

/// Hashes and verifies user passwords with salted Argon2id
#[derive(Clone)]
pub struct CredentialStore {
    argon2: Argon2<'static>,
    /// Hash of a throwaway password, verified against when the user is unknown
    dummy_hash: String,
}

impl CredentialStore {
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        let params = Params::new(
            config.hash_memory_kib,
            config.hash_iterations,
            config.hash_parallelism,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Invalid password hashing parameters: {}", e)))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let dummy_hash = hash_with(&argon2, "not-a-real-password")?;

        Ok(Self { argon2, dummy_hash })
    }

    /// Hash a password with a fresh random salt, returning a PHC string
    pub fn hash(&self, password: &str) -> AppResult<String> {
        hash_with(&self.argon2, password)
    }

    /// Check a password against a stored hash in constant time
    pub fn verify(&self, password: &str, stored_hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(stored_hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::Internal(format!("Failed to verify password: {}", e))),
        }
    }

    /// Spend the cost of one verification without any account behind it
    pub fn burn(&self, password: &str) {
        let _ = self.verify(password, &self.dummy_hash);
    }
}

fn hash_with(argon2: &Argon2<'_>, password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}
