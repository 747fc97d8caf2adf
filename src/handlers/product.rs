// src/handlers/product.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::product::{Product, ProductPayload, ProductQuery},
};

// GET /api/products?supplier_id=
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    params(("supplier_id" = i64, Query, description = "Supplier whose catalog is listed")),
    responses(
        (status = 200, description = "Active products", body = Vec<Product>),
        (status = 400, description = "supplier_id missing"),
        (status = 403, description = "No accepted link with this supplier")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Query(query): Query<ProductQuery>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state
        .product_service
        .list_for_supplier(&identity, query.supplier_id)
        .await?;
    Ok(Json(products))
}

// POST /api/suppliers/{id}/products
#[utoipa::path(
    post,
    path = "/api/suppliers/{id}/products",
    tag = "Products",
    params(("id" = i64, Path, description = "Supplier id")),
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Invalid data"),
        (status = 403, description = "Only owners or managers")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(supplier_id): Path<i64>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let product = app_state
        .product_service
        .create_product(&identity, supplier_id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

// PUT /api/suppliers/{id}/products/{product_id}
#[utoipa::path(
    put,
    path = "/api/suppliers/{id}/products/{product_id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Supplier id"),
        ("product_id" = i64, Path, description = "Product id")
    ),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 404, description = "Product not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path((supplier_id, product_id)): Path<(i64, i64)>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let product = app_state
        .product_service
        .update_product(&identity, supplier_id, product_id, &payload)
        .await?;
    Ok(Json(product))
}

// DELETE /api/suppliers/{id}/products/{product_id}
#[utoipa::path(
    delete,
    path = "/api/suppliers/{id}/products/{product_id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Supplier id"),
        ("product_id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 204, description = "Product deactivated"),
        (status = 404, description = "Product not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path((supplier_id, product_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .product_service
        .delete_product(&identity, supplier_id, product_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
