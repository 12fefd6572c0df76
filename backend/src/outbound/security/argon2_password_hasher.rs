//! Argon2id implementation of the [`PasswordHasher`] port.
//!
//! Hashing is CPU-bound by design, so both operations run on Tokio's blocking
//! pool.

use argon2::password_hash::{self, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier, Version};
use async_trait::async_trait;
use rand_core::OsRng;
use tokio::task;

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::{Password, PasswordHash};

/// Argon2id hasher producing PHC strings with a random per-call salt.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    context: Argon2<'static>,
}

impl std::fmt::Debug for Argon2PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2PasswordHasher").finish_non_exhaustive()
    }
}

impl Argon2PasswordHasher {
    /// Hasher using the library's default cost parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(Params::DEFAULT)
    }

    /// Hasher with explicit cost parameters.
    #[must_use]
    pub fn with_params(params: Params) -> Self {
        Self {
            context: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn join_error(err: &task::JoinError) -> PasswordHasherError {
    PasswordHasherError::hashing(format!("hashing task failed: {err}"))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError> {
        let context = self.context.clone();
        let password = password.clone();
        task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            context
                .hash_password(password.expose().as_bytes(), &salt)
                .map(|digest| PasswordHash::new(digest.to_string()))
                .map_err(|err| PasswordHasherError::hashing(err.to_string()))
        })
        .await
        .map_err(|err| join_error(&err))?
    }

    async fn verify(
        &self,
        password: &Password,
        digest: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let context = self.context.clone();
        let password = password.clone();
        let digest = digest.clone();
        task::spawn_blocking(move || {
            let parsed = password_hash::PasswordHash::new(digest.as_str())
                .map_err(|err| PasswordHasherError::malformed_digest(err.to_string()))?;
            match context.verify_password(password.expose().as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(err) => Err(PasswordHasherError::hashing(err.to_string())),
            }
        })
        .await
        .map_err(|err| join_error(&err))?
    }
}
