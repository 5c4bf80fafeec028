//! API handlers for the lending desk REST endpoints

pub mod accounts;
pub mod health;
pub mod items;
pub mod loans;
pub mod openapi;
pub mod session;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Accounts
        .route("/accounts", get(accounts::list_accounts))
        .route("/accounts", post(accounts::create_account))
        // Session
        .route("/session", get(session::current_user))
        .route("/session/login", post(session::login))
        .route("/session/logout", post(session::logout))
        // Catalog
        .route("/items", get(items::list_items))
        .route("/items", post(items::add_item))
        .route("/items/available", get(items::list_available))
        // Loans
        .route("/loans", post(loans::lend_resource))
        .route("/loans/return", post(loans::return_resource))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
