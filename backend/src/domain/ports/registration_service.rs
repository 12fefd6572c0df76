//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an account, failing with a conflict when the email is taken.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}
