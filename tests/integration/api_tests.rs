//! API integration tests, driven in-process through the router

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde_json::{json, Value};
use tower::ServiceExt;

use lending_desk::{
    api, config::AppConfig, services::Services, test_support::MutableClock, AppState,
};

struct TestApp {
    router: Router,
    clock: Arc<MutableClock>,
}

impl TestApp {
    fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    fn with_config(config: AppConfig) -> Self {
        let clock = Arc::new(MutableClock::at_fixture_time());
        let services = Services::new(&config, clock.clone());
        let state = AppState {
            services: Arc::new(services),
        };
        Self {
            router: api::create_router(state),
            clock,
        }
    }

    async fn send(&self, method: &str, path: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(format!("/api/v1{}", path));

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Failed to parse response")
        };
        (status, value)
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", path, Some(body)).await
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.send("GET", path, None).await
    }

    async fn register_and_login(&self, username: &str, category: i64) {
        let (status, _) = self
            .post(
                "/accounts",
                json!({ "username": username, "password": "pw", "category": category, "school": "Arts" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = self
            .post("/session/login", json!({ "username": username, "password": "pw" }))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    async fn lend(&self, title: &str) -> (StatusCode, Value) {
        self.post("/loans", json!({ "title": title })).await
    }

    async fn give_back(&self, title: &str) -> (StatusCode, Value) {
        self.post("/loans/return", json!({ "title": title })).await
    }
}

fn due_date(body: &Value) -> DateTime<Utc> {
    body["due_date"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("No due date in response")
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();
    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_inception_scenario() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/session/login", json!({ "username": "bob", "password": "x" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "NoSuchUser");

    let (status, body) = app
        .post("/accounts", json!({ "username": "bob", "password": "x", "category": 2 }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["category"], "public_user");

    let (status, body) = app
        .post("/session/login", json!({ "username": "bob", "password": "x" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "bob");

    let (status, body) = app.lend("Inception").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(due_date(&body), app.clock.utc() + Duration::seconds(864_000));

    let (status, body) = app.lend("Inception").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "ItemNotAvailable");

    let (status, _) = app.give_back("Inception").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.lend("Inception").await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_loans_require_session() {
    let app = TestApp::new();

    let (status, body) = app.lend("Inception").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "NotAuthorized");

    let (status, _) = app.give_back("Inception").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/session").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = TestApp::new();
    app.register_and_login("ada", 1).await;

    let (status, body) = app.get("/session").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "lecturer");

    let (status, _) = app.send("POST", "/session/logout", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.send("POST", "/session/logout", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.lend("Time").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_account_validation() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/accounts", json!({ "username": "eve", "password": "pw", "category": 7 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let (status, _) = app
        .post("/accounts", json!({ "username": "", "password": "pw", "category": 2 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post("/accounts", json!({ "username": "tom", "password": "pw", "category": 0 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app.get("/accounts").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let app = TestApp::new();
    app.register_and_login("ada", 1).await;

    let (status, body) = app
        .post("/accounts", json!({ "username": "ada", "password": "other", "category": 2 }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Duplicate");

    let (_, body) = app.get("/accounts").await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["category"], "lecturer");
    assert!(body[0].get("password").is_none());
}

#[tokio::test]
async fn test_student_loan_lasts_thirty_days() {
    let app = TestApp::new();
    app.register_and_login("tom", 0).await;

    let (status, body) = app.lend("A Tale of Two Cities").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(due_date(&body), app.clock.utc() + Duration::days(30));
}

#[tokio::test]
async fn test_unknown_title_and_double_return() {
    let app = TestApp::new();
    app.register_and_login("bob", 2).await;

    let (status, body) = app.lend("Dune").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchItem");

    let (status, body) = app.give_back("Time").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "ItemAlreadyAvailable");
}

#[tokio::test]
async fn test_list_available_groups_seed_catalog() {
    let app = TestApp::new();
    let (status, body) = app.get("/items/available").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "book": ["A Tale of Two Cities", "Think and Grow Rich"],
            "dvd": ["Inception", "The Dark Knight"],
            "magazine": ["National Geographic", "Time"]
        })
    );
}

#[tokio::test]
async fn test_overdue_item_blocks_lending_and_listing() {
    let app = TestApp::new();
    app.register_and_login("bob", 2).await;

    let (status, _) = app.lend("The Dark Knight").await;
    assert_eq!(status, StatusCode::CREATED);
    app.clock.advance_days(11);

    let (_, body) = app.get("/items/available").await;
    assert_eq!(body["dvd"], json!(["Inception"]));

    let (status, body) = app.lend("Time").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "OverdueItems");

    let (status, _) = app.lend("Inception").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.give_back("The Dark Knight").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.lend("Time").await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_add_item_and_lend_it() {
    let mut config = AppConfig::default();
    config.catalog.seed_defaults = false;
    let app = TestApp::with_config(config);

    let (status, body) = app
        .post(
            "/items",
            json!({ "variant": 2, "title": "Wired", "fields": ["Conde Nast", "202405", 32] }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["details"]["kind"], "magazine");
    assert_eq!(body["details"]["issue_number"], 202405);
    assert_eq!(body["available"], true);

    let (status, body) = app
        .post("/items", json!({ "variant": 4, "title": "Ghost", "fields": [] }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let (status, _) = app
        .post("/items", json!({ "variant": 0, "title": "Dune", "fields": ["Frank Herbert", "isbn", "lots"] }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app.get("/items/available").await;
    assert_eq!(body, json!({ "magazine": ["Wired"] }));

    app.register_and_login("ada", 1).await;
    let (status, _) = app.lend("Wired").await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = app.get("/items").await;
    assert_eq!(body[0]["available"], false);
    assert_eq!(body[0]["overdue"], false);
}

#[tokio::test]
async fn test_add_item_with_non_numeric_json_field() {
    let app = TestApp::new();

    for fields in [
        json!(["Frank Herbert", "9780441013593", 412.5]),
        json!(["Frank Herbert", "9780441013593", null]),
        json!(["Frank Herbert", false, 412]),
    ] {
        let (status, body) = app
            .post("/items", json!({ "variant": 0, "title": "Dune", "fields": fields }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "BadValue");
    }

    let (status, body) = app.post("/items", json!({ "variant": 0, "title": "Dune" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let (_, body) = app.get("/items").await;
    assert_eq!(body.as_array().map(Vec::len), Some(6));
}
