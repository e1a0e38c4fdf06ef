use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::db::{AppState, queries};
use crate::error::{AppError, Result};
use crate::extractors::{Json, Path, Query};
use crate::middleware::RequireAdmin;
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::plans::{self, NormalizedPlan, PlanSelector};

#[derive(Deserialize)]
pub struct ListProductsQuery {
    pub category: Option<String>,
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<Vec<Product>>> {
    let conn = state.db.get()?;
    let products = match query.category.as_deref() {
        Some(category) => queries::list_products_by_category(&conn, category)?,
        None => queries::list_products(&conn)?,
    };
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let conn = state.db.get()?;
    let product = queries::get_product_by_id(&conn, &id)?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;
    Ok(Json(product))
}

#[derive(Deserialize)]
pub struct PlanQuery {
    /// Duration label the shopper tapped; absent means "use the default".
    pub selected: Option<String>,
}

/// Derived plan state for one product, as the storefront renders it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanView {
    pub plans: Vec<NormalizedPlan>,
    /// Resolved selection; null when the product has no plans or the
    /// requested label no longer exists.
    pub selected_duration: Option<String>,
    /// Discount badge value; null when suppressed (no selection, zero or
    /// negative discount).
    pub discount_percent: Option<i32>,
    pub can_purchase: bool,
}

pub async fn get_product_plans(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PlanQuery>,
) -> Result<Json<PlanView>> {
    let conn = state.db.get()?;
    let product = queries::get_product_by_id(&conn, &id)?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;

    let mut selector = PlanSelector::new(plans::normalize(&product));
    if let Some(ref selected) = query.selected {
        selector.select(selected);
    }

    Ok(Json(PlanView {
        selected_duration: selector.selected_duration().map(String::from),
        discount_percent: selector.discount_badge(),
        can_purchase: selector.can_purchase(),
        plans: selector.plans().to_vec(),
    }))
}

pub async fn create_product(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(input): Json<CreateProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    input.validate()?;

    let conn = state.db.get()?;
    let product = queries::create_product(&conn, &input)?;

    tracing::info!("Created product {} ({})", product.name, product.id);

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
    Json(input): Json<UpdateProduct>,
) -> Result<Json<Product>> {
    input.validate()?;

    let conn = state.db.get()?;
    queries::get_product_by_id(&conn, &id)?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;

    queries::update_product(&conn, &id, &input)?;

    let product = queries::get_product_by_id(&conn, &id)?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;

    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let conn = state.db.get()?;
    if !queries::delete_product(&conn, &id)? {
        return Err(AppError::NotFound("Product not found".into()));
    }

    tracing::info!("Deleted product {}", id);

    Ok(StatusCode::NO_CONTENT)
}
