//! Bearer token extraction for authenticated endpoints.
//!
//! Handlers take a [`BearerToken`] argument; a missing or malformed
//! `Authorization` header rejects the request with `401 Unauthorized` before
//! the handler runs. Signature and expiry checks stay in the domain.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::account_service::UNAUTHORIZED_MESSAGE;
use crate::domain::{AccessToken, Error};

const BEARER_PREFIX: &str = "Bearer ";

/// Raw bearer token taken from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct BearerToken(AccessToken);

impl BearerToken {
    /// Borrow the wrapped token.
    pub fn token(&self) -> &AccessToken {
        &self.0
    }

    /// Unwrap the token.
    pub fn into_inner(self) -> AccessToken {
        self.0
    }

    fn from_header(value: Option<&str>) -> Result<Self, Error> {
        let raw = value
            .and_then(|header| header.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| Error::unauthorized(UNAUTHORIZED_MESSAGE))?;
        Ok(Self(AccessToken::new(raw)))
    }
}

impl FromRequest for BearerToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        let result = Self::from_header(header);
        if result.is_err() {
            debug!(present = header.is_some(), "rejected authorization header");
        }
        ready(result)
    }
}
