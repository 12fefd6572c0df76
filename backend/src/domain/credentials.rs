//! Credential payloads validated before they reach the account service.
//!
//! Inbound adapters pass raw strings (empty when a field is absent) and get
//! back typed commands or a [`CredentialsValidationError`] whose message is
//! safe to return to clients.

use std::fmt;

use tracing::debug;
use zeroize::Zeroizing;

use super::{EmailAddress, Error, UserName};

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Validation failures for registration, login and profile payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// A required registration or login field was empty.
    MissingFields,
    /// Name or email was empty on a profile update.
    MissingProfileFields,
    InvalidEmail,
    PasswordMismatch,
    PasswordTooShort { min: usize },
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => write!(f, "All fields are required."),
            Self::MissingProfileFields => write!(f, "Name and email are required."),
            Self::InvalidEmail => write!(f, "Invalid email address."),
            Self::PasswordMismatch => write!(f, "Passwords do not match."),
            Self::PasswordTooShort { min } => {
                write!(f, "Password must be at least {min} characters.")
            }
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

impl From<CredentialsValidationError> for Error {
    fn from(value: CredentialsValidationError) -> Self {
        Error::invalid_request(value.to_string())
    }
}

/// Plaintext password held only as long as hashing or verification needs it.
///
/// The buffer is wiped on drop and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap a plaintext password without validation.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Plaintext value for the hasher.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Length in UTF-16 code units, the unit browsers count in.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.encode_utf16().count()
    }

    /// Whether the password is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the password meets [`MIN_PASSWORD_LEN`].
    #[must_use]
    pub fn meets_minimum_length(&self) -> bool {
        self.len() >= MIN_PASSWORD_LEN
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

fn map_name(name: &str) -> Result<UserName, CredentialsValidationError> {
    UserName::new(name).map_err(|_| CredentialsValidationError::MissingFields)
}

fn map_email(email: &str) -> Result<EmailAddress, CredentialsValidationError> {
    EmailAddress::new(email).map_err(|_| CredentialsValidationError::InvalidEmail)
}

/// Validated registration request.
///
/// Checks run in a fixed order: presence, email shape, confirmation match,
/// then minimum length.
///
/// # Examples
/// ```
/// use accounts::domain::Registration;
///
/// let registration =
///     Registration::try_from_parts("Ada", "ada@example.com", "secret1", "secret1").unwrap();
/// assert_eq!(registration.email().as_ref(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: UserName,
    email: EmailAddress,
    password: Password,
}

impl Registration {
    /// Validate raw registration inputs.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        if name.trim().is_empty()
            || email.is_empty()
            || password.is_empty()
            || confirm_password.is_empty()
        {
            return Err(CredentialsValidationError::MissingFields);
        }
        let email = map_email(email)?;
        if password != confirm_password {
            return Err(CredentialsValidationError::PasswordMismatch);
        }
        let password = Password::new(password);
        if !password.meets_minimum_length() {
            return Err(CredentialsValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        let name = map_name(name)?;

        Ok(Self {
            name,
            email,
            password,
        })
    }

    #[must_use]
    pub fn name(&self) -> &UserName {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Validated login credentials.
///
/// The password is not length-checked; a short password simply fails
/// verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        if email.is_empty() || password.is_empty() {
            return Err(CredentialsValidationError::MissingFields);
        }
        Ok(Self {
            email: map_email(email)?,
            password: Password::new(password),
        })
    }

    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Validated profile update.
///
/// A supplied password shorter than [`MIN_PASSWORD_LEN`] is dropped rather
/// than rejected, leaving the stored password unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    name: UserName,
    email: EmailAddress,
    password: Option<Password>,
}

impl ProfileUpdate {
    /// Validate raw profile inputs.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        if name.trim().is_empty() || email.is_empty() {
            return Err(CredentialsValidationError::MissingProfileFields);
        }
        let email = map_email(email)?;
        let name = map_name(name).map_err(|err| match err {
            CredentialsValidationError::MissingFields => {
                CredentialsValidationError::MissingProfileFields
            }
            other => other,
        })?;

        let password = password.map(Password::new).and_then(|candidate| {
            if candidate.meets_minimum_length() {
                Some(candidate)
            } else {
                if !candidate.is_empty() {
                    debug!("ignoring password shorter than the minimum on profile update");
                }
                None
            }
        });

        Ok(Self {
            name,
            email,
            password,
        })
    }

    #[must_use]
    pub fn name(&self) -> &UserName {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Replacement password, if one long enough was supplied.
    #[must_use]
    pub fn password(&self) -> Option<&Password> {
        self.password.as_ref()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "ada@example.com", "secret1", "secret1", CredentialsValidationError::MissingFields)]
    #[case("   ", "ada@example.com", "secret1", "secret1", CredentialsValidationError::MissingFields)]
    #[case("Ada", "", "secret1", "secret1", CredentialsValidationError::MissingFields)]
    #[case("Ada", "ada@example.com", "", "secret1", CredentialsValidationError::MissingFields)]
    #[case("Ada", "ada@example.com", "secret1", "", CredentialsValidationError::MissingFields)]
    #[case("Ada", "ada@example", "secret1", "secret1", CredentialsValidationError::InvalidEmail)]
    #[case("Ada", "ada@example.com", "secret1", "secret2", CredentialsValidationError::PasswordMismatch)]
    #[case("Ada", "ada@example.com", "abc", "abc", CredentialsValidationError::PasswordTooShort { min: 6 })]
    // Malformed email wins over a short mismatched password.
    #[case("Ada", "nope", "a", "b", CredentialsValidationError::InvalidEmail)]
    fn registration_rejects_invalid_input(
        #[case] name: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] confirm: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        let err = Registration::try_from_parts(name, email, password, confirm)
            .expect_err("invalid registration");
        assert_eq!(err, expected);
    }

    #[test]
    fn registration_accepts_exactly_minimum_length() {
        let registration =
            Registration::try_from_parts(" Ada ", "ada@example.com", "123456", "123456")
                .expect("valid registration");
        assert_eq!(registration.name().as_ref(), "Ada");
        assert_eq!(registration.password().expose(), "123456");
    }

    #[rstest]
    #[case("\u{1F600}\u{1F600}\u{1F600}", 6)]
    #[case("\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}", 6)]
    #[case("\u{e9}\u{e9}\u{e9}", 3)]
    fn password_length_counts_utf16_units(#[case] raw: &str, #[case] expected: usize) {
        assert_eq!(Password::new(raw).len(), expected);
    }

    #[test]
    fn registration_accepts_three_astral_characters() {
        let raw = "\u{1F600}\u{1F600}\u{1F600}";
        Registration::try_from_parts("Ada", "ada@example.com", raw, raw)
            .expect("six UTF-16 units meet the minimum");
    }

    #[test]
    fn registration_accepts_long_names_and_emails() {
        let name = "A".repeat(250);
        let email = format!("{}@example.com", "a".repeat(309));
        let registration =
            Registration::try_from_parts(&name, &email, "secret1", "secret1")
                .expect("no length caps");
        assert_eq!(registration.name().as_ref(), name);
        assert_eq!(registration.email().as_ref(), email);
    }

    #[rstest]
    #[case("", "pw", CredentialsValidationError::MissingFields)]
    #[case("ada@example.com", "", CredentialsValidationError::MissingFields)]
    #[case("ada.example.com", "pw", CredentialsValidationError::InvalidEmail)]
    fn login_rejects_invalid_input(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password).expect_err("invalid login");
        assert_eq!(err, expected);
    }

    #[test]
    fn login_keeps_short_passwords() {
        let creds = LoginCredentials::try_from_parts("ada@example.com", "pw").expect("valid");
        assert_eq!(creds.password().expose(), "pw");
    }

    #[rstest]
    #[case("", "ada@example.com", CredentialsValidationError::MissingProfileFields)]
    #[case("  ", "ada@example.com", CredentialsValidationError::MissingProfileFields)]
    #[case("Ada", "", CredentialsValidationError::MissingProfileFields)]
    #[case("Ada", "ada", CredentialsValidationError::InvalidEmail)]
    fn profile_update_rejects_invalid_input(
        #[case] name: &str,
        #[case] email: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        let err = ProfileUpdate::try_from_parts(name, email, None).expect_err("invalid update");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some(""), false)]
    #[case(Some("abc"), false)]
    #[case(Some("abcdef"), true)]
    fn profile_update_only_keeps_long_passwords(
        #[case] password: Option<&str>,
        #[case] kept: bool,
    ) {
        let update = ProfileUpdate::try_from_parts("Ada", "ada@example.com", password)
            .expect("valid update");
        assert_eq!(update.password().is_some(), kept);
    }

    #[test]
    fn password_debug_is_redacted() {
        let rendered = format!("{:?}", Password::new("hunter22"));
        assert!(!rendered.contains("hunter22"));
    }

    #[rstest]
    #[case(CredentialsValidationError::MissingFields, "All fields are required.")]
    #[case(CredentialsValidationError::MissingProfileFields, "Name and email are required.")]
    #[case(CredentialsValidationError::InvalidEmail, "Invalid email address.")]
    #[case(CredentialsValidationError::PasswordMismatch, "Passwords do not match.")]
    #[case(
        CredentialsValidationError::PasswordTooShort { min: 6 },
        "Password must be at least 6 characters."
    )]
    fn validation_errors_become_invalid_requests(
        #[case] err: CredentialsValidationError,
        #[case] message: &str,
    ) {
        let error = Error::from(err);
        assert_eq!(error.code(), crate::domain::ErrorCode::InvalidRequest);
        assert_eq!(error.message(), message);
    }
}
