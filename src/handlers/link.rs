// src/handlers/link.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::link::{CreateLinkPayload, LinkView, UpdateLinkStatusPayload},
};

// GET /api/links/my
#[utoipa::path(
    get,
    path = "/api/links/my",
    tag = "Links",
    responses(
        (status = 200, description = "Links visible to the caller", body = Vec<LinkView>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_my_links(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let links = app_state.link_service.list_my_links(&identity).await?;
    Ok(Json(links))
}

// POST /api/links
#[utoipa::path(
    post,
    path = "/api/links",
    tag = "Links",
    request_body = CreateLinkPayload,
    responses(
        (status = 201, description = "Pending link created", body = LinkView),
        (status = 403, description = "Caller is not a consumer"),
        (status = 404, description = "Supplier not found"),
        (status = 409, description = "A non-removed link already exists")
    ),
    security(("api_jwt" = []))
)]
pub async fn request_link(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Json(payload): Json<CreateLinkPayload>,
) -> Result<impl IntoResponse, AppError> {
    let link = app_state
        .link_service
        .request_link(&identity, payload.supplier_id)
        .await?;
    Ok((StatusCode::CREATED, Json(link)))
}

// POST /api/links/{id}/status
#[utoipa::path(
    post,
    path = "/api/links/{id}/status",
    tag = "Links",
    params(("id" = i64, Path, description = "Link id")),
    request_body = UpdateLinkStatusPayload,
    responses(
        (status = 200, description = "Link updated", body = LinkView),
        (status = 403, description = "Actor cannot perform this transition"),
        (status = 409, description = "Invalid transition or stale state")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_link_status(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(link_id): Path<i64>,
    Json(payload): Json<UpdateLinkStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let link = app_state
        .link_service
        .update_status(&identity, link_id, payload.status)
        .await?;
    Ok(Json(link))
}
