//! Account registration endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::AppResult, models::user::UserShort};

/// Create account request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAccountRequest {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
    /// 0 for student, 1 for lecturer, 2 for public user
    pub category: i64,
    /// School (required for students)
    pub school: Option<String>,
}

/// List registered accounts
#[utoipa::path(
    get,
    path = "/accounts",
    tag = "accounts",
    responses(
        (status = 200, description = "Registered users in registration order", body = Vec<UserShort>)
    )
)]
pub async fn list_accounts(State(state): State<crate::AppState>) -> Json<Vec<UserShort>> {
    Json(state.services.library().await.users())
}

/// Create a new account
#[utoipa::path(
    post,
    path = "/accounts",
    tag = "accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = UserShort),
        (status = 400, description = "Invalid category or input"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn create_account(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> AppResult<(StatusCode, Json<UserShort>)> {
    request.validate()?;

    let created = state.services.library().await.create_account(
        &request.username,
        &request.password,
        request.category,
        request.school,
    )?;

    Ok((StatusCode::CREATED, Json(created)))
}
