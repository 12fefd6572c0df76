//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;
use tracing::debug;

use crate::domain::Error;

pub mod auth;
pub mod error;
pub mod health;
pub mod profile;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

/// Message returned when a request body is not valid JSON for the endpoint.
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body.";

/// JSON extractor configuration mapping body errors to the standard envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected request body");
        Error::invalid_request(INVALID_BODY_MESSAGE).into()
    })
}

/// Register every account route on the given service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::register)
        .service(users::login)
        .service(profile::get_profile)
        .service(profile::update_profile);
}
