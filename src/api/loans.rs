//! Loan endpoints

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppResult;

/// Lend or return request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TitleRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
}

/// Loan response with the computed due date
#[derive(Serialize, ToSchema)]
pub struct LoanResponse {
    pub title: String,
    /// Due date (ISO 8601 format)
    pub due_date: DateTime<Utc>,
    /// Status message
    pub message: String,
}

/// Return response
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    pub title: String,
    /// Status message
    pub message: String,
}

/// Lend an item to the logged-in user
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    request_body = TitleRequest,
    responses(
        (status = 201, description = "Item lent", body = LoanResponse),
        (status = 401, description = "Nobody is logged in"),
        (status = 404, description = "No item with this title"),
        (status = 409, description = "Item is not available"),
        (status = 422, description = "An overdue item blocks lending")
    )
)]
pub async fn lend_resource(
    State(state): State<crate::AppState>,
    Json(request): Json<TitleRequest>,
) -> AppResult<(StatusCode, Json<LoanResponse>)> {
    request.validate()?;

    let due_date = state.services.library().await.lend_resource(&request.title)?;

    Ok((
        StatusCode::CREATED,
        Json(LoanResponse {
            message: format!("{} lent successfully", request.title),
            title: request.title,
            due_date,
        }),
    ))
}

/// Return a lent item
#[utoipa::path(
    post,
    path = "/loans/return",
    tag = "loans",
    request_body = TitleRequest,
    responses(
        (status = 200, description = "Item returned", body = ReturnResponse),
        (status = 401, description = "Nobody is logged in"),
        (status = 404, description = "No item with this title"),
        (status = 409, description = "Item is already available")
    )
)]
pub async fn return_resource(
    State(state): State<crate::AppState>,
    Json(request): Json<TitleRequest>,
) -> AppResult<Json<ReturnResponse>> {
    request.validate()?;

    state.services.library().await.return_resource(&request.title)?;

    Ok(Json(ReturnResponse {
        message: format!("{} returned successfully", request.title),
        title: request.title,
    }))
}
