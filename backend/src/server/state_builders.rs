//! Builders wiring adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use accounts::domain::AccountService;
use accounts::domain::ports::UserRepository;
use accounts::inbound::http::state::HttpState;
use accounts::outbound::memory::InMemoryUserRepository;
use accounts::outbound::persistence::DieselUserRepository;
use accounts::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer};

use super::ServerConfig;

fn build_user_repository(config: &ServerConfig) -> Arc<dyn UserRepository> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselUserRepository::new(pool.clone())),
        None => {
            warn!("no database configured; accounts are kept in memory and lost on restart");
            Arc::new(InMemoryUserRepository::new())
        }
    }
}

/// Build the HTTP state from configuration.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let tokens = JwtTokenIssuer::new(config.tokens.secret(), Arc::new(DefaultClock));
    let service = AccountService::new(
        build_user_repository(config),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(tokens),
    );
    web::Data::new(HttpState::from_service(Arc::new(service)))
}
