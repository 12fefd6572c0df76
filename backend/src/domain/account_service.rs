//! Account domain service.
//!
//! Implements the registration, login and profile driving ports on top of the
//! credential store, password hasher and token issuer driven ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    LoginService, PasswordHasher, PasswordHasherError, ProfileCommand, ProfileQuery,
    RegistrationService, TokenError, TokenIssuer, UserChanges, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    AccessToken, Error, LoginCredentials, LoginOutcome, ProfileUpdate, Registration,
    TokenSubject, User, UserAccount, UserId,
};

/// Message returned for every login failure that depends on the credentials.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Incorrect email or password.";
/// Message returned for any token problem.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized.";
/// Message returned when the token's account is gone.
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found.";
/// Conflict message on registration.
pub const EMAIL_REGISTERED_MESSAGE: &str = "Email is already registered.";
/// Conflict message on profile update.
pub const EMAIL_IN_USE_MESSAGE: &str = "Email is already in use.";

/// Account service implementing the driving ports.
///
/// Adapters may be concrete types or trait objects such as
/// `dyn UserRepository`.
pub struct AccountService<R: ?Sized, H: ?Sized, T: ?Sized> {
    users: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<R: ?Sized, H: ?Sized, T: ?Sized> Clone for AccountService<R, H, T> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            hasher: Arc::clone(&self.hasher),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

impl<R: ?Sized, H: ?Sized, T: ?Sized> AccountService<R, H, T> {
    /// Create a new service over the given adapters.
    pub fn new(users: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

impl<R, H, T> AccountService<R, H, T>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenIssuer + ?Sized,
{
    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::internal(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateEmail { .. } => Error::conflict(EMAIL_REGISTERED_MESSAGE),
        }
    }

    fn map_hasher_error(error: PasswordHasherError) -> Error {
        Error::internal(error.to_string())
    }

    fn map_token_error(error: TokenError) -> Error {
        match error {
            TokenError::Invalid | TokenError::Expired => {
                debug!(%error, "rejecting bearer token");
                Error::unauthorized(UNAUTHORIZED_MESSAGE)
            }
            TokenError::Signing { message } => {
                Error::internal(format!("failed to sign token: {message}"))
            }
        }
    }

    fn authenticate(&self, token: &AccessToken) -> Result<UserId, Error> {
        self.tokens
            .verify(token)
            .map(|claims| claims.id)
            .map_err(Self::map_token_error)
    }
}

#[async_trait]
impl<R, H, T> RegistrationService for AccountService<R, H, T>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenIssuer + ?Sized,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_email(registration.email())
            .await
            .map_err(Self::map_persistence_error)?;
        if existing.is_some() {
            return Err(Error::conflict(EMAIL_REGISTERED_MESSAGE));
        }

        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(Self::map_hasher_error)?;
        let user = User::new(
            UserId::random(),
            registration.name().clone(),
            registration.email().clone(),
        );
        let account = UserAccount::new(user.clone(), password_hash);

        // The store enforces uniqueness too; a racing insert surfaces here.
        self.users
            .insert(&account)
            .await
            .map_err(Self::map_persistence_error)?;

        info!(user_id = %user.id(), "registered account");
        Ok(user)
    }
}

#[async_trait]
impl<R, H, T> LoginService for AccountService<R, H, T>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenIssuer + ?Sized,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error> {
        let Some(account) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(Self::map_persistence_error)?
        else {
            debug!("login for unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), account.password_hash())
            .await
            .map_err(Self::map_hasher_error)?;
        if !matches {
            debug!(user_id = %account.user().id(), "login with wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        }

        let (user, _) = account.into_parts();
        let token = self
            .tokens
            .issue(&TokenSubject::from(&user))
            .map_err(Self::map_token_error)?;

        info!(user_id = %user.id(), "login succeeded");
        Ok(LoginOutcome { token, user })
    }
}

#[async_trait]
impl<R, H, T> ProfileQuery for AccountService<R, H, T>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenIssuer + ?Sized,
{
    async fn get_profile(&self, token: &AccessToken) -> Result<User, Error> {
        let user_id = self.authenticate(token)?;
        self.users
            .find_by_id(&user_id)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| {
                warn!(%user_id, "token refers to a missing account");
                Error::not_found(USER_NOT_FOUND_MESSAGE)
            })
    }
}

#[async_trait]
impl<R, H, T> ProfileCommand for AccountService<R, H, T>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenIssuer + ?Sized,
{
    async fn update_profile(
        &self,
        token: &AccessToken,
        update: &ProfileUpdate,
    ) -> Result<User, Error> {
        let user_id = self.authenticate(token)?;

        let holder = self
            .users
            .find_by_email(update.email())
            .await
            .map_err(Self::map_persistence_error)?;
        if holder.is_some_and(|account| account.user().id() != &user_id) {
            return Err(Error::conflict(EMAIL_IN_USE_MESSAGE));
        }

        let password_hash = match update.password() {
            Some(password) => Some(
                self.hasher
                    .hash(password)
                    .await
                    .map_err(Self::map_hasher_error)?,
            ),
            None => None,
        };
        let changes = UserChanges {
            name: update.name().clone(),
            email: update.email().clone(),
            password_hash,
        };

        let updated = self
            .users
            .update(&user_id, &changes)
            .await
            .map_err(|err| match err {
                UserPersistenceError::DuplicateEmail { .. } => {
                    Error::conflict(EMAIL_IN_USE_MESSAGE)
                }
                other => Self::map_persistence_error(other),
            })?
            .ok_or_else(|| {
                Error::internal(format!("account {user_id} vanished before update"))
            })?;

        info!(user_id = %updated.id(), "profile updated");
        Ok(updated)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
