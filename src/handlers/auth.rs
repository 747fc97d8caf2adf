// src/handlers/auth.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{LoginQuery, LoginResponse, LoginUserPayload, RegisterUserPayload, UserOut},
};

// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "User registered", body = UserOut),
        (status = 400, description = "Invalid data"),
        (status = 409, description = "E-mail already registered")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = app_state
        .auth_service
        .register_user(&payload.email, &payload.password, &payload.full_name)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

// POST /api/auth/login?platform=mobile|web
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    params(
        ("platform" = Option<String>, Query, description = "mobile | web")
    ),
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Incorrect email or password"),
        (status = 403, description = "User is inactive")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Query(query): Query<LoginQuery>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let response = app_state
        .auth_service
        .login_user(&payload.email, &payload.password, query.platform)
        .await?;

    Ok(Json(response))
}

// GET /api/users/me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Current user with resolved roles", body = UserOut),
        (status = 401, description = "Invalid token")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(identity): AuthenticatedUser) -> Json<UserOut> {
    Json(identity.to_user_out())
}
