// src/handlers/chat.rs

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
    models::chat::{CreateMessagePayload, MessageResponse},
};

// POST /api/chat/messages
#[utoipa::path(
    post,
    path = "/api/chat/messages",
    tag = "Chat",
    request_body = CreateMessagePayload,
    responses(
        (status = 201, description = "Message stored", body = MessageResponse),
        (status = 403, description = "No accepted link or not part of the conversation")
    ),
    security(("api_jwt" = []))
)]
pub async fn send_message(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Json(payload): Json<CreateMessagePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let message = app_state.chat_service.send_message(&identity, &payload).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

// GET /api/chat/threads/{supplier_id}/{consumer_id}
#[utoipa::path(
    get,
    path = "/api/chat/threads/{supplier_id}/{consumer_id}",
    tag = "Chat",
    params(
        ("supplier_id" = i64, Path, description = "Supplier id"),
        ("consumer_id" = i64, Path, description = "Consumer id")
    ),
    responses(
        (status = 200, description = "Messages in chronological order", body = Vec<MessageResponse>),
        (status = 403, description = "No accepted link or not part of the conversation")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_thread(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path((supplier_id, consumer_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    let messages = app_state
        .chat_service
        .get_thread(&identity, supplier_id, consumer_id)
        .await?;
    Ok(Json(messages))
}
