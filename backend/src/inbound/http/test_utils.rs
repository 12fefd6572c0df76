//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::{App, web};

use crate::domain::User;
use crate::domain::ports::{
    MockLoginService, MockProfileCommand, MockProfileQuery, MockRegistrationService,
};
use crate::inbound::http::json_config;
use crate::inbound::http::state::HttpState;

pub const FIXTURE_USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// Account returned by mocked ports.
pub fn fixture_user() -> User {
    User::try_from_strings(FIXTURE_USER_ID, "Ada Lovelace", "ada@example.com")
        .expect("fixture user is valid")
}

/// Mocked driving ports; unset expectations panic when called.
#[derive(Default)]
pub struct MockPorts {
    pub registration: MockRegistrationService,
    pub login: MockLoginService,
    pub profile: MockProfileQuery,
    pub profile_command: MockProfileCommand,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.registration),
            Arc::new(self.login),
            Arc::new(self.profile),
            Arc::new(self.profile_command),
        )
    }
}

/// Application shell carrying the given state and the JSON error handler.
pub fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
}
