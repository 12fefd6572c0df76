//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing the backing store, hasher or
//! token format.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, LoginOutcome};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and issue a bearer token.
    ///
    /// Unknown emails and wrong passwords fail with the same error.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error>;
}
