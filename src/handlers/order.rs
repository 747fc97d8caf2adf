// src/handlers/order.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::order::{CreateOrderPayload, OrderResponse, UpdateOrderStatusPayload},
};

// POST /api/orders
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Order created with computed totals", body = OrderResponse),
        (status = 400, description = "Below minimum order, delivery method required or invalid data"),
        (status = 403, description = "No accepted link with the supplier"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Insufficient stock")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let order = app_state.order_service.create_order(&identity, &payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

// GET /api/orders/my
#[utoipa::path(
    get,
    path = "/api/orders/my",
    tag = "Orders",
    responses(
        (status = 200, description = "Orders as consumer and as supplier staff", body = Vec<OrderResponse>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_my_orders(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state.order_service.list_my_orders(&identity).await?;
    Ok(Json(orders))
}

// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order with items", body = OrderResponse),
        (status = 404, description = "Order not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(order_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state.order_service.get_order(&identity, order_id).await?;
    Ok(Json(order))
}

// POST /api/orders/{id}/status
#[utoipa::path(
    post,
    path = "/api/orders/{id}/status",
    tag = "Orders",
    params(("id" = i64, Path, description = "Order id")),
    request_body = UpdateOrderStatusPayload,
    responses(
        (status = 200, description = "Status updated", body = OrderResponse),
        (status = 403, description = "Only supplier owners or managers"),
        (status = 409, description = "Invalid transition or stale state")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_order_status(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(order_id): Path<i64>,
    Json(payload): Json<UpdateOrderStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .order_service
        .update_status(&identity, order_id, payload.new_status)
        .await?;
    Ok(Json(order))
}

// POST /api/orders/{id}/cancel
#[utoipa::path(
    post,
    path = "/api/orders/{id}/cancel",
    tag = "Orders",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order cancelled, stock restored", body = OrderResponse),
        (status = 409, description = "Only accepted orders can be cancelled")
    ),
    security(("api_jwt" = []))
)]
pub async fn cancel_order(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(order_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state.order_service.cancel_by_consumer(&identity, order_id).await?;
    Ok(Json(order))
}

// POST /api/orders/{id}/reorder
#[utoipa::path(
    post,
    path = "/api/orders/{id}/reorder",
    tag = "Orders",
    params(("id" = i64, Path, description = "Original order id")),
    responses(
        (status = 201, description = "New order created from the original items", body = OrderResponse),
        (status = 404, description = "Order or product not found"),
        (status = 409, description = "Insufficient stock")
    ),
    security(("api_jwt" = []))
)]
pub async fn reorder(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(order_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state.order_service.reorder(&identity, order_id).await?;
    Ok((StatusCode::CREATED, Json(order)))
}
