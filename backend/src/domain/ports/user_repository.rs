//! Port abstraction for the credential store and its errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, PasswordHash, User, UserAccount, UserId, UserName};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The email is already held by another account.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Field changes applied by a profile update.
///
/// `password_hash` is `None` when the stored digest must be kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub name: UserName,
    pub email: EmailAddress,
    pub password_hash: Option<PasswordHash>,
}

/// Credential store.
///
/// Adapters must enforce email uniqueness atomically and report collisions as
/// [`UserPersistenceError::DuplicateEmail`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch an account, digest included, by login email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Apply `changes` to the account and return the updated user.
    ///
    /// Returns `Ok(None)` when no account has the identifier.
    async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError>;
}
