//! Driving port for reading the caller's profile.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Resolve the token and return the current stored user.
    async fn get_profile(&self, token: &AccessToken) -> Result<User, Error>;
}
