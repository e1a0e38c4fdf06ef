pub mod admin;
pub mod products;

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::Serialize;

use crate::db::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Full API surface. Catalog reads and the session endpoints are
/// public; catalog writes carry the [`RequireAdmin`] guard inside their
/// handlers.
///
/// [`RequireAdmin`]: crate::middleware::RequireAdmin
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/products/{id}",
            get(products::get_product)
                .patch(products::update_product)
                .delete(products::delete_product),
        )
        .route("/api/products/{id}/plans", get(products::get_product_plans))
        .route("/api/admin/login", post(admin::login))
        .route("/api/admin/logout", post(admin::logout))
        .route("/api/admin/session", get(admin::session))
}
