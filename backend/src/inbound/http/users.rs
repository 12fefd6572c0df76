//! Registration and login handlers.
//!
//! ```text
//! POST /register {"name":"Ada","email":"ada@example.com","password":"secret1","confirmPassword":"secret1"}
//! POST /login {"email":"ada@example.com","password":"secret1"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{LoginCredentials, Registration, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;

pub const REGISTERED_MESSAGE: &str = "User registered successfully.";
pub const LOGGED_IN_MESSAGE: &str = "Login successful.";

/// Registration request body for `POST /register`.
///
/// Absent fields deserialise as `None` and fail validation with the
/// "All fields are required." message rather than a parse error.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Login request body for `POST /login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response body for a successful registration.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    #[schema(example = "User registered successfully.")]
    pub message: String,
    pub user: User,
}

/// Response body for a successful login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Login successful.")]
    pub message: String,
    /// Bearer token valid for seven days.
    pub token: String,
    pub user: User,
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Invalid input or email already registered", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let registration = Registration::try_from_parts(
        request.name.as_deref().unwrap_or_default(),
        request.email.as_deref().unwrap_or_default(),
        request.password.as_deref().unwrap_or_default(),
        request.confirm_password.as_deref().unwrap_or_default(),
    )?;
    let user = state.registration.register(&registration).await?;
    info!(user_id = %user.id(), "user registered");
    Ok(HttpResponse::Created().json(RegisterResponse {
        message: REGISTERED_MESSAGE.to_owned(),
        user,
    }))
}

/// Exchange email and password for a bearer token.
///
/// Unknown emails and wrong passwords produce the same response.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 401, description = "Incorrect email or password", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(
        request.email.as_deref().unwrap_or_default(),
        request.password.as_deref().unwrap_or_default(),
    )?;
    let outcome = state.login.login(&credentials).await?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        message: LOGGED_IN_MESSAGE.to_owned(),
        token: outcome.token.as_str().to_owned(),
        user: outcome.user,
    }))
}
