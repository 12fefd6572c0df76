//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the request and response bodies
//! and the bearer token security scheme. The generated document backs Swagger
//! UI in debug builds and the `openapi-dump` binary.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::User;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::profile::{ProfileResponse, UpdateProfileRequest};
use crate::inbound::http::users::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /login, valid for seven days."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Accounts API",
        description = "Registration, login and bearer-authenticated profile management."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::profile::get_profile,
        crate::inbound::http::profile::update_profile,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        ErrorBody,
        RegisterRequest,
        RegisterResponse,
        LoginRequest,
        LoginResponse,
        UpdateProfileRequest,
        ProfileResponse
    )),
    tags(
        (name = "users", description = "Registration and login"),
        (name = "profile", description = "Bearer-authenticated profile access"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
