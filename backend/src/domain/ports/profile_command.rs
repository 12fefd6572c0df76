//! Driving port for editing the caller's profile.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, ProfileUpdate, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Apply `update` to the account the token belongs to.
    async fn update_profile(
        &self,
        token: &AccessToken,
        update: &ProfileUpdate,
    ) -> Result<User, Error>;
}
