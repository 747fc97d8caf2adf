// src/handlers/supplier.rs

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
    models::{
        auth::StaffMember,
        supplier::{AddStaffPayload, Consumer, CreateConsumerPayload, CreateSupplierPayload, Supplier},
    },
};

// =============================================================================
//  FORNECEDORES
// =============================================================================

// GET /api/suppliers
#[utoipa::path(
    get,
    path = "/api/suppliers",
    tag = "Suppliers",
    responses(
        (status = 200, description = "Active suppliers", body = Vec<Supplier>)
    )
)]
pub async fn list_suppliers(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let suppliers = app_state.supplier_service.list_active().await?;
    Ok(Json(suppliers))
}

// POST /api/suppliers
#[utoipa::path(
    post,
    path = "/api/suppliers",
    tag = "Suppliers",
    request_body = CreateSupplierPayload,
    responses(
        (status = 201, description = "Supplier created, caller is OWNER", body = Supplier),
        (status = 400, description = "Invalid data")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_supplier(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Json(payload): Json<CreateSupplierPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let supplier = app_state.supplier_service.create_supplier(&identity, &payload).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

// GET /api/suppliers/my
#[utoipa::path(
    get,
    path = "/api/suppliers/my",
    tag = "Suppliers",
    responses(
        (status = 200, description = "Suppliers where the caller is staff", body = Vec<Supplier>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_my_suppliers(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let suppliers = app_state.supplier_service.list_my_suppliers(&identity).await?;
    Ok(Json(suppliers))
}

// DELETE /api/suppliers/{id}
#[utoipa::path(
    delete,
    path = "/api/suppliers/{id}",
    tag = "Suppliers",
    params(("id" = i64, Path, description = "Supplier id")),
    responses(
        (status = 204, description = "Supplier deactivated"),
        (status = 403, description = "Only the owner can deactivate"),
        (status = 404, description = "Supplier not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn deactivate_supplier(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(supplier_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.supplier_service.deactivate_supplier(&identity, supplier_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  EQUIPE
// =============================================================================

// POST /api/suppliers/{id}/staff
#[utoipa::path(
    post,
    path = "/api/suppliers/{id}/staff",
    tag = "Suppliers",
    params(("id" = i64, Path, description = "Supplier id")),
    request_body = AddStaffPayload,
    responses(
        (status = 201, description = "Staff member added", body = StaffMember),
        (status = 403, description = "Only the owner can add staff"),
        (status = 404, description = "User not found"),
        (status = 409, description = "User already has a role in this supplier")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_staff(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(supplier_id): Path<i64>,
    Json(payload): Json<AddStaffPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let member = app_state
        .supplier_service
        .add_staff(&identity, supplier_id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(member)))
}

// GET /api/suppliers/{id}/staff
#[utoipa::path(
    get,
    path = "/api/suppliers/{id}/staff",
    tag = "Suppliers",
    params(("id" = i64, Path, description = "Supplier id")),
    responses(
        (status = 200, description = "Staff list", body = Vec<StaffMember>),
        (status = 403, description = "Only owners or managers")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_staff(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(supplier_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let staff = app_state.supplier_service.list_staff(&identity, supplier_id).await?;
    Ok(Json(staff))
}

// DELETE /api/suppliers/{id}/staff/{user_id}
#[utoipa::path(
    delete,
    path = "/api/suppliers/{id}/staff/{user_id}",
    tag = "Suppliers",
    params(
        ("id" = i64, Path, description = "Supplier id"),
        ("user_id" = i64, Path, description = "Staff user id")
    ),
    responses(
        (status = 204, description = "Staff member removed"),
        (status = 403, description = "Only the owner can remove staff")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_staff(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path((supplier_id, user_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .supplier_service
        .remove_staff(&identity, supplier_id, user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  CONSUMIDORES
// =============================================================================

// POST /api/consumers
#[utoipa::path(
    post,
    path = "/api/consumers",
    tag = "Consumers",
    request_body = CreateConsumerPayload,
    responses(
        (status = 201, description = "Consumer profile created", body = Consumer),
        (status = 409, description = "Consumer profile already exists")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_consumer(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Json(payload): Json<CreateConsumerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let consumer = app_state.supplier_service.create_consumer(&identity, &payload).await?;
    Ok((StatusCode::CREATED, Json(consumer)))
}

// GET /api/consumers/me
#[utoipa::path(
    get,
    path = "/api/consumers/me",
    tag = "Consumers",
    responses(
        (status = 200, description = "Caller's consumer profile", body = Consumer),
        (status = 404, description = "No consumer profile")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_my_consumer(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let consumer = app_state.supplier_service.get_my_consumer(&identity).await?;
    Ok(Json(consumer))
}
