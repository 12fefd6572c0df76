//! Driven port for signing and verifying bearer tokens.
use crate::domain::{AccessToken, TokenClaims, TokenSubject};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// Signature, encoding or claims are invalid.
        Invalid => "token is invalid",
        /// The token's `exp` is not in the future.
        Expired => "token has expired",
        /// Signing a new token failed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Signs identity claims into a bearer token and checks them back.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Issue a token for `subject` valid for [`crate::domain::token_ttl`].
    fn issue(&self, subject: &TokenSubject) -> Result<AccessToken, TokenError>;

    /// Verify signature and expiry, returning the embedded claims.
    fn verify(&self, token: &AccessToken) -> Result<TokenClaims, TokenError>;
}
