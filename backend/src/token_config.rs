//! Token signing secret configuration.
//!
//! The secret comes from `JWT_SECRET`, or from the file named by
//! `TOKEN_SECRET_FILE`. Release builds insist on a real secret of at least
//! [`TOKEN_SECRET_MIN_LEN`] bytes; debug builds fall back to a random
//! per-process secret so tokens do not survive restarts.

use std::fmt;
use std::path::PathBuf;

use mockable::Env;
use rand_core::{OsRng, RngCore};
use tracing::warn;
use zeroize::Zeroizing;

const TOKEN_SECRET_DEFAULT_PATH: &str = "/var/run/secrets/token_secret";
pub const TOKEN_SECRET_MIN_LEN: usize = 32;
const SECRET_ENV: &str = "JWT_SECRET";
const SECRET_FILE_ENV: &str = "TOKEN_SECRET_FILE";
const ALLOW_EPHEMERAL_ENV: &str = "TOKEN_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Build mode for token configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate missing secrets and emit warnings.
    Debug,
    /// Release builds require an explicit, sufficiently long secret.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use accounts::token_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Signing secret for bearer tokens.
pub struct TokenSettings {
    secret: Zeroizing<Vec<u8>>,
    ephemeral: bool,
}

impl TokenSettings {
    /// Raw HMAC key bytes.
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Whether the secret was generated for this process only.
    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"<redacted>")
            .field("ephemeral", &self.ephemeral)
            .finish()
    }
}

/// Errors raised while validating token configuration.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the secret file failed.
    #[error("failed to read token secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configured secret is too short for release builds.
    #[error("token secret from {origin} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        origin: String,
        length: usize,
        min_len: usize,
    },
    /// Release builds must not allow ephemeral secrets.
    #[error("TOKEN_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build token settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use accounts::token_config::{BuildMode, token_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "JWT_SECRET" => Some("0123456789abcdef0123456789abcdef".to_owned()),
///     _ => None,
/// });
///
/// let settings = token_settings_from_env(&env, BuildMode::Release).expect("valid secret");
/// assert_eq!(settings.secret().len(), 32);
/// ```
///
/// # Errors
///
/// Returns [`TokenConfigError`] when release-mode requirements are not met.
pub fn token_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSettings, TokenConfigError> {
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;

    if let Some(inline) = env.string(SECRET_ENV).filter(|value| !value.is_empty()) {
        let secret = Zeroizing::new(inline.into_bytes());
        return checked(secret, SECRET_ENV.to_owned(), mode);
    }

    let path = PathBuf::from(
        env.string(SECRET_FILE_ENV)
            .unwrap_or_else(|| TOKEN_SECRET_DEFAULT_PATH.to_owned()),
    );
    match std::fs::read(&path) {
        Ok(bytes) => checked(Zeroizing::new(bytes), path.display().to_string(), mode),
        Err(error) => {
            if mode.is_debug() || allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary token secret (dev only)"
                );
                Ok(ephemeral_settings())
            } else {
                Err(TokenConfigError::SecretRead {
                    path,
                    source: error,
                })
            }
        }
    }
}

fn checked(
    secret: Zeroizing<Vec<u8>>,
    origin: String,
    mode: BuildMode,
) -> Result<TokenSettings, TokenConfigError> {
    let length = secret.len();
    if length < TOKEN_SECRET_MIN_LEN {
        if mode.is_debug() {
            warn!(origin = %origin, length, "token secret shorter than recommended");
        } else {
            return Err(TokenConfigError::SecretTooShort {
                origin,
                length,
                min_len: TOKEN_SECRET_MIN_LEN,
            });
        }
    }
    Ok(TokenSettings {
        secret,
        ephemeral: false,
    })
}

fn ephemeral_settings() -> TokenSettings {
    let mut secret = Zeroizing::new(vec![0_u8; TOKEN_SECRET_MIN_LEN * 2]);
    OsRng.fill_bytes(secret.as_mut_slice());
    TokenSettings {
        secret,
        ephemeral: true,
    }
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, TokenConfigError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        return Ok(false);
    };
    match parse_bool(&value) {
        Some(true) if !mode.is_debug() => Err(TokenConfigError::EphemeralNotAllowed),
        Some(flag) => Ok(flag),
        None if mode.is_debug() => {
            warn!(value = %value, "invalid TOKEN_ALLOW_EPHEMERAL; defaulting to disabled");
            Ok(false)
        }
        None => Err(TokenConfigError::InvalidEnv {
            name: ALLOW_EPHEMERAL_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
