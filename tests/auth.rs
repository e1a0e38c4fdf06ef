//! Authorization and session tests for the admin surface.
//!
//! These tests verify that:
//! 1. Write endpoints reject requests without a live admin session
//! 2. Read endpoints stay public
//! 3. Login/logout manage the session store correctly
//! 4. Failed logins are throttled per client IP

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use common::*;

#[tokio::test]
async fn test_writes_require_admin_session() {
    let state = create_test_app_state();
    let app = test_app(state.clone());

    let body = json!({
        "category": "Subscriptions",
        "name": "Intruder",
        "image": "https://images.example.com/x.png",
        "description": "should never be stored"
    });

    let response = send_json(&app, "POST", "/api/products", &body, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send_json(&app, "PATCH", "/api/products/some-id", &body, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, "DELETE", "/api/products/some-id", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // no mutation happened
    let conn = state.db.get().unwrap();
    assert_eq!(queries::count_products(&conn).unwrap(), 0);
}

#[tokio::test]
async fn test_bogus_session_cookie_is_rejected() {
    let app = test_app(create_test_app_state());

    let response = send(
        &app,
        "DELETE",
        "/api/products/some-id",
        Some("substore_session=forged-token"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_reads_are_public() {
    let state = create_test_app_state();
    let app = test_app(state.clone());

    let id = {
        let conn = state.db.get().unwrap();
        create_test_product(&conn, "Public Read").id
    };

    assert_eq!(send(&app, "GET", "/api/products", None).await.status(), StatusCode::OK);
    assert_eq!(
        send(&app, "GET", &format!("/api/products/{}", id), None).await.status(),
        StatusCode::OK
    );
    assert_eq!(
        send(&app, "GET", &format!("/api/products/{}/plans", id), None).await.status(),
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_login_with_missing_password_is_400() {
    let app = test_app(create_test_app_state());

    let response = send_json(&app, "POST", "/api/admin/login", &json!({}), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send_json(&app, "POST", "/api/admin/login", &json!({ "password": "" }), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_with_wrong_password_is_401() {
    let app = test_app(create_test_app_state());

    let response = send_json(
        &app,
        "POST",
        "/api/admin/login",
        &json!({ "password": "definitely-wrong" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_grants_a_working_session() {
    let app = test_app(create_test_app_state());

    // before login the session endpoint reports non-admin
    let body = body_json(send(&app, "GET", "/api/admin/session", None).await).await;
    assert_eq!(body["isAdmin"], false);

    let cookie = login_admin(&app).await;

    let body = body_json(send(&app, "GET", "/api/admin/session", Some(&cookie)).await).await;
    assert_eq!(body["isAdmin"], true);

    // and the cookie authorizes writes
    let response = send_json(
        &app,
        "POST",
        "/api/products",
        &json!({
            "category": "Subscriptions",
            "name": "Admin Made",
            "image": "https://images.example.com/ok.png",
            "description": "created through a live session"
        }),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_logout_destroys_the_session() {
    let app = test_app(create_test_app_state());
    let cookie = login_admin(&app).await;

    let response = send(&app, "POST", "/api/admin/logout", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);

    let body = body_json(send(&app, "GET", "/api/admin/session", Some(&cookie)).await).await;
    assert_eq!(body["isAdmin"], false);

    let response = send(&app, "DELETE", "/api/products/any", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_session_still_succeeds() {
    let app = test_app(create_test_app_state());

    let response = send(&app, "POST", "/api/admin/logout", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_expired_session_reads_as_not_admin() {
    let state = AppState {
        sessions: std::sync::Arc::new(SessionStore::new(-1)),
        ..create_test_app_state()
    };
    let app = test_app(state.clone());

    let cookie = login_admin(&app).await;

    let body = body_json(send(&app, "GET", "/api/admin/session", Some(&cookie)).await).await;
    assert_eq!(body["isAdmin"], false);

    let response = send(&app, "DELETE", "/api/products/any", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

async fn login_from_ip(app: &axum::Router, password: &str, ip: &str) -> StatusCode {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/login")
                .header("content-type", "application/json")
                .header("x-forwarded-for", ip)
                .body(Body::from(
                    serde_json::to_string(&json!({ "password": password })).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    response.status()
}

#[tokio::test]
async fn test_failed_logins_are_throttled_per_ip() {
    let app = test_app(create_test_app_state());

    for _ in 0..5 {
        assert_eq!(
            login_from_ip(&app, "wrong", "203.0.113.9").await,
            StatusCode::UNAUTHORIZED
        );
    }

    // the window is full: even the right password is throttled now
    assert_eq!(
        login_from_ip(&app, "wrong", "203.0.113.9").await,
        StatusCode::TOO_MANY_REQUESTS
    );
    assert_eq!(
        login_from_ip(&app, TEST_ADMIN_PASSWORD, "203.0.113.9").await,
        StatusCode::TOO_MANY_REQUESTS
    );

    // a different client is unaffected
    assert_eq!(
        login_from_ip(&app, TEST_ADMIN_PASSWORD, "198.51.100.7").await,
        StatusCode::OK
    );
}
