//! Domain primitives, services and ports.
//!
//! Purpose: define the account model, validation rules and use-cases
//! independently of HTTP and storage. Adapters in `inbound` and `outbound`
//! depend on this module, never the other way round.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failures.
//! - User, UserId, UserName, EmailAddress: the public account projection.
//! - Registration, LoginCredentials, ProfileUpdate: validated commands.
//! - AccountService: implementation of the driving ports in [`ports`].

pub mod account;
pub mod account_service;
pub mod credentials;
pub mod error;
pub mod ports;
pub mod token;
pub mod trace_id;
pub mod user;

pub use self::account::{PasswordHash, UserAccount};
pub use self::account_service::AccountService;
pub use self::credentials::{
    CredentialsValidationError, LoginCredentials, MIN_PASSWORD_LEN, Password, ProfileUpdate,
    Registration,
};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::token::{
    AccessToken, LoginOutcome, TOKEN_TTL_SECONDS, TokenClaims, TokenSubject, token_ttl,
};
pub use self::trace_id::TraceId;
pub use self::user::{EmailAddress, User, UserId, UserName, UserValidationError};
