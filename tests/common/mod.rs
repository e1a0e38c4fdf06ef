//! Test utilities and fixtures for Substore integration tests

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header::SET_COOKIE};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub use substore::crypto::hash_secret;
pub use substore::db::{AppState, init_db, queries};
pub use substore::models::*;
pub use substore::plans::{self, NormalizedPlan, PlanSelector};
pub use substore::rate_limit::LoginRateLimiter;
pub use substore::session::{SESSION_COOKIE, SessionStore};

/// Password every test app accepts for admin login.
pub const TEST_ADMIN_PASSWORD: &str = "test-admin-password";

/// Create an in-memory test database with schema initialized
pub fn setup_test_db() -> Connection {
    let conn = Connection::open_in_memory().expect("Failed to create in-memory database");
    init_db(&conn).expect("Failed to initialize schema");
    conn
}

/// Create an AppState for testing with an in-memory database.
/// The pool is capped at one connection so every query sees the same
/// in-memory database.
pub fn create_test_app_state() -> AppState {
    let manager = SqliteConnectionManager::memory();
    let pool = Pool::builder().max_size(1).build(manager).unwrap();
    {
        let conn = pool.get().unwrap();
        init_db(&conn).unwrap();
    }

    AppState {
        db: pool,
        sessions: Arc::new(SessionStore::new(3600)),
        login_limiter: Arc::new(LoginRateLimiter::default()),
        admin_password_hash: hash_secret(TEST_ADMIN_PASSWORD),
    }
}

/// Build the full application router over a test state
pub fn test_app(state: AppState) -> Router {
    substore::handlers::router().with_state(state)
}

/// A typical catalog entry: 1- and 3-month tiers configured, 6- and
/// 12-month left unconfigured, one custom option.
pub fn test_product_input(name: &str) -> CreateProduct {
    CreateProduct {
        category: "Subscriptions".to_string(),
        name: name.to_string(),
        image: "https://images.example.com/product.png".to_string(),
        description: "Full HD streaming\nWatch on 2 screens".to_string(),
        price_1_month_actual: 499,
        price_1_month_selling: 299,
        in_stock_1_month: true,
        price_3_month_actual: 1497,
        price_3_month_selling: 849,
        in_stock_3_month: true,
        price_6_month_actual: 0,
        price_6_month_selling: 0,
        in_stock_6_month: false,
        price_12_month_actual: 0,
        price_12_month_selling: 0,
        in_stock_12_month: false,
        custom_options: vec![CustomOption {
            id: "opt-1".to_string(),
            label: "Lifetime".to_string(),
            actual_price: 9999,
            selling_price: 4999,
            in_stock: true,
        }],
    }
}

/// Create a test product directly through the query layer
pub fn create_test_product(conn: &Connection, name: &str) -> Product {
    queries::create_product(conn, &test_product_input(name)).expect("Failed to create test product")
}

/// Send a request without a body
pub async fn send(app: &Router, method: &str, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Send a request with a JSON body
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: &Value,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    app.clone()
        .oneshot(
            builder
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Read a response body as JSON
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Log in as admin and return the session cookie pair (`name=token`)
pub async fn login_admin(app: &Router) -> String {
    let response = send_json(
        app,
        "POST",
        "/api/admin/login",
        &serde_json::json!({ "password": TEST_ADMIN_PASSWORD }),
        None,
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("login did not set a session cookie")
        .to_str()
        .unwrap();

    let pair = set_cookie
        .split(';')
        .next()
        .expect("malformed set-cookie header");
    assert!(pair.starts_with(SESSION_COOKIE));
    pair.to_string()
}
