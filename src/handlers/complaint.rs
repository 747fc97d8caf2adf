// src/handlers/complaint.rs

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
    models::complaint::{
        Complaint, CreateComplaintPayload, Incident, UpdateComplaintStatusPayload,
        UpdateIncidentStatusPayload,
    },
};

// =============================================================================
//  RECLAMAÇÕES
// =============================================================================

// POST /api/complaints
#[utoipa::path(
    post,
    path = "/api/complaints",
    tag = "Complaints",
    request_body = CreateComplaintPayload,
    responses(
        (status = 201, description = "Complaint opened", body = Complaint),
        (status = 403, description = "Order belongs to another consumer"),
        (status = 404, description = "Order not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_complaint(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Json(payload): Json<CreateComplaintPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let complaint = app_state
        .complaint_service
        .create_complaint(&identity, payload.order_id, &payload.description)
        .await?;
    Ok((StatusCode::CREATED, Json(complaint)))
}

// GET /api/complaints/my
#[utoipa::path(
    get,
    path = "/api/complaints/my",
    tag = "Complaints",
    responses(
        (status = 200, description = "Complaints as consumer and as staff", body = Vec<Complaint>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_my_complaints(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let complaints = app_state.complaint_service.list_my_complaints(&identity).await?;
    Ok(Json(complaints))
}

// POST /api/complaints/{id}/status
#[utoipa::path(
    post,
    path = "/api/complaints/{id}/status",
    tag = "Complaints",
    params(("id" = i64, Path, description = "Complaint id")),
    request_body = UpdateComplaintStatusPayload,
    responses(
        (status = 200, description = "Status updated", body = Complaint),
        (status = 403, description = "Role cannot perform this transition"),
        (status = 409, description = "Invalid transition or stale state")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_complaint_status(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(complaint_id): Path<i64>,
    Json(payload): Json<UpdateComplaintStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let complaint = app_state
        .complaint_service
        .update_status(&identity, complaint_id, payload.status, payload.resolution.as_deref())
        .await?;
    Ok(Json(complaint))
}

// POST /api/complaints/{id}/escalate
#[utoipa::path(
    post,
    path = "/api/complaints/{id}/escalate",
    tag = "Complaints",
    params(("id" = i64, Path, description = "Complaint id")),
    responses(
        (status = 200, description = "Complaint escalated", body = Complaint),
        (status = 403, description = "Only sales staff"),
        (status = 409, description = "Complaint is not in progress")
    ),
    security(("api_jwt" = []))
)]
pub async fn escalate_complaint(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(complaint_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let complaint = app_state.complaint_service.escalate(&identity, complaint_id).await?;
    Ok(Json(complaint))
}

// =============================================================================
//  OCORRÊNCIAS
// =============================================================================

// GET /api/incidents/my
#[utoipa::path(
    get,
    path = "/api/incidents/my",
    tag = "Incidents",
    responses(
        (status = 200, description = "Incidents visible to the caller", body = Vec<Incident>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_my_incidents(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let incidents = app_state.complaint_service.list_my_incidents(&identity).await?;
    Ok(Json(incidents))
}

// POST /api/incidents/{id}/status
#[utoipa::path(
    post,
    path = "/api/incidents/{id}/status",
    tag = "Incidents",
    params(("id" = i64, Path, description = "Incident id")),
    request_body = UpdateIncidentStatusPayload,
    responses(
        (status = 200, description = "Incident updated", body = Incident),
        (status = 403, description = "Only owners, managers or platform admins")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_incident_status(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(incident_id): Path<i64>,
    Json(payload): Json<UpdateIncidentStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let incident = app_state
        .complaint_service
        .update_incident_status(&identity, incident_id, payload.status)
        .await?;
    Ok(Json(incident))
}
