//! Session endpoints (single library-wide session)

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::AppResult, models::user::UserShort};

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,
    pub password: String,
}

/// Log a user in
#[utoipa::path(
    post,
    path = "/session/login",
    tag = "session",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = UserShort),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<UserShort>> {
    request.validate()?;

    let user = state
        .services
        .library()
        .await
        .login(&request.username, &request.password)?;
    Ok(Json(user))
}

/// Log the current user out
#[utoipa::path(
    post,
    path = "/session/logout",
    tag = "session",
    responses(
        (status = 204, description = "Logged out")
    )
)]
pub async fn logout(State(state): State<crate::AppState>) -> StatusCode {
    state.services.library().await.logout();
    StatusCode::NO_CONTENT
}

/// Get the logged-in user
#[utoipa::path(
    get,
    path = "/session",
    tag = "session",
    responses(
        (status = 200, description = "Logged-in user", body = UserShort),
        (status = 401, description = "Nobody is logged in")
    )
)]
pub async fn current_user(State(state): State<crate::AppState>) -> AppResult<Json<UserShort>> {
    let user = state.services.library().await.current_user()?;
    Ok(Json(user))
}
