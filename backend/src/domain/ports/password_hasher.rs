//! Driven port for one-way password hashing.
use async_trait::async_trait;

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// Producing a digest failed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// The stored digest could not be parsed.
        MalformedDigest { message: String } => "stored password digest is malformed: {message}",
    }
}

/// Salted, deliberately slow password hashing.
///
/// A mismatch on [`PasswordHasher::verify`] is `Ok(false)`, never an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh random salt.
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError>;

    /// Check `password` against a digest produced by [`PasswordHasher::hash`].
    async fn verify(
        &self,
        password: &Password,
        digest: &PasswordHash,
    ) -> Result<bool, PasswordHasherError>;
}
