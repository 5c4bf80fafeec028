//! Catalog endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::item::{FieldValue, ItemView},
    services::AvailableByKind,
};

/// Add item request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddItemRequest {
    /// 0 for book, 1 for DVD, 2 for magazine
    pub variant: i64,
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    /// Positional fields. Book: author, ISBN, pages.
    /// DVD: director, format, duration (minutes), genre.
    /// Magazine: publisher, issue number, issue.
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub fields: Vec<FieldValue>,
}

/// List every catalog item with its loan state
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    responses(
        (status = 200, description = "Catalog in insertion order", body = Vec<ItemView>)
    )
)]
pub async fn list_items(State(state): State<crate::AppState>) -> Json<Vec<ItemView>> {
    Json(state.services.library().await.list_items())
}

/// List titles that are not overdue, grouped by kind
#[utoipa::path(
    get,
    path = "/items/available",
    tag = "items",
    responses(
        (status = 200, description = "Titles grouped under `book`, `dvd` and `magazine`, empty groups omitted")
    )
)]
pub async fn list_available(State(state): State<crate::AppState>) -> Json<AvailableByKind> {
    Json(state.services.library().await.list_available())
}

/// Add a new item to the catalog
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = AddItemRequest,
    responses(
        (status = 201, description = "Item added", body = ItemView),
        (status = 400, description = "Invalid item type or malformed field")
    )
)]
pub async fn add_item(
    State(state): State<crate::AppState>,
    Json(request): Json<AddItemRequest>,
) -> AppResult<(StatusCode, Json<ItemView>)> {
    request.validate()?;

    let item = state
        .services
        .library()
        .await
        .add_item(request.variant, &request.title, &request.fields)?;

    Ok((StatusCode::CREATED, Json(item)))
}
