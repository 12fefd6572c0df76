//! Bearer token primitives.
//!
//! Tokens are stateless: validity depends only on the signature and the
//! `exp` claim. Nothing is persisted and nothing can be revoked.

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::{User, UserId};

/// Lifetime of an issued token, in seconds (seven days).
pub const TOKEN_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Lifetime of an issued token.
#[must_use]
pub fn token_ttl() -> Duration {
    Duration::seconds(TOKEN_TTL_SECONDS)
}

/// Claims embedded in a signed token.
///
/// `iat` and `exp` are Unix timestamps in seconds. The claims carry the
/// identity snapshot at issue time; handlers re-read the store for current
/// values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Identity fields signed into a new token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<&User> for TokenSubject {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().clone(),
            name: user.name().to_string(),
            email: user.email().to_string(),
        }
    }
}

/// Opaque compact-serialised bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    /// Wrap a raw token string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Raw token for transmission or verification.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Successful login result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub token: AccessToken,
    pub user: User,
}
