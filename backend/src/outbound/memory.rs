//! In-process credential store.
//!
//! Used when no database is configured and by tests. A single mutex guards
//! the map so the email uniqueness check and the write happen atomically.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserChanges, UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserAccount, UserId};

/// Credential store backed by a `HashMap` keyed by user id.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<HashMap<UserId, UserAccount>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<UserId, UserAccount>>, UserPersistenceError> {
        self.accounts
            .lock()
            .map_err(|_| UserPersistenceError::connection("in-memory user store lock poisoned"))
    }

    fn email_taken(
        accounts: &HashMap<UserId, UserAccount>,
        email: &EmailAddress,
        except: Option<&UserId>,
    ) -> bool {
        accounts.values().any(|account| {
            account.user().email() == email && Some(account.user().id()) != except
        })
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut accounts = self.lock()?;
        let email = account.user().email();
        if Self::email_taken(&accounts, email, None) {
            return Err(UserPersistenceError::duplicate_email(email.as_ref()));
        }
        if accounts.contains_key(account.user().id()) {
            return Err(UserPersistenceError::query("user id already exists"));
        }
        accounts.insert(account.user().id().clone(), account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let accounts = self.lock()?;
        Ok(accounts.get(id).map(|account| account.user().clone()))
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let accounts = self.lock()?;
        Ok(accounts
            .values()
            .find(|account| account.user().email() == email)
            .cloned())
    }

    async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut accounts = self.lock()?;
        if Self::email_taken(&accounts, &changes.email, Some(id)) {
            return Err(UserPersistenceError::duplicate_email(changes.email.as_ref()));
        }
        let Some(current) = accounts.get_mut(id) else {
            return Ok(None);
        };

        let user = User::new(id.clone(), changes.name.clone(), changes.email.clone());
        let password_hash = changes
            .password_hash
            .clone()
            .unwrap_or_else(|| current.password_hash().clone());
        *current = UserAccount::new(user.clone(), password_hash);
        Ok(Some(user))
    }
}
