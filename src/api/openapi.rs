//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{accounts, health, items, loans, session};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lending Desk API",
        version = "0.1.0",
        description = "Library lending REST API: accounts, session, catalog and loans",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        // Accounts
        accounts::list_accounts,
        accounts::create_account,
        // Session
        session::login,
        session::logout,
        session::current_user,
        // Items
        items::list_items,
        items::list_available,
        items::add_item,
        // Loans
        loans::lend_resource,
        loans::return_resource,
    ),
    components(
        schemas(
            // Accounts and session
            accounts::CreateAccountRequest,
            session::LoginRequest,
            crate::models::user::UserShort,
            crate::models::user::UserCategory,
            // Items
            items::AddItemRequest,
            crate::models::item::ItemView,
            crate::models::item::ItemDetails,
            crate::models::item::ItemKind,
            // Loans
            loans::TitleRequest,
            loans::LoanResponse,
            loans::ReturnResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "accounts", description = "Account registration"),
        (name = "session", description = "Login and logout"),
        (name = "items", description = "Catalog browsing and additions"),
        (name = "loans", description = "Lending and returns")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
