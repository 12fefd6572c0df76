//! Profile handlers for the account behind a bearer token.
//!
//! ```text
//! GET /profile            Authorization: Bearer <token>
//! PUT /profile {"name":"Ada","email":"ada@example.com","password":"new-secret"}
//! ```

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{ProfileUpdate, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerToken;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;

/// Profile update body for `PUT /profile`.
///
/// `password` is optional; values shorter than six characters are ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Envelope returned by both profile endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub user: User,
}

/// Fetch the authenticated account.
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Account profile", body = ProfileResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorBody),
        (status = 404, description = "Account no longer exists", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["profile"],
    operation_id = "getProfile",
    security(("bearerAuth" = []))
)]
#[get("/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    bearer: BearerToken,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user = state.profile.get_profile(bearer.token()).await?;
    Ok(web::Json(ProfileResponse { user }))
}

/// Replace the authenticated account's name and email, optionally rotating
/// its password.
#[utoipa::path(
    put,
    path = "/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Invalid input or email already in use", body = ErrorBody),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["profile"],
    operation_id = "updateProfile",
    security(("bearerAuth" = []))
)]
#[put("/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    bearer: BearerToken,
    payload: web::Json<UpdateProfileRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let request = payload.into_inner();
    let update = ProfileUpdate::try_from_parts(
        request.name.as_deref().unwrap_or_default(),
        request.email.as_deref().unwrap_or_default(),
        request.password.as_deref(),
    )?;
    let user = state
        .profile_command
        .update_profile(bearer.token(), &update)
        .await?;
    info!(
        user_id = %user.id(),
        password_changed = update.password().is_some(),
        "profile updated"
    );
    Ok(web::Json(ProfileResponse { user }))
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
