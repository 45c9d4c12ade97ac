// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::auth::{AuthResponse, LoginPayload, User},
};

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Sessão ativada", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale.0, &app_state.i18n_store))?;

    let (token, user, tenant) = app_state
        .session_service
        .login(&payload.email, &payload.password)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(AuthResponse {
        token,
        user,
        tenant,
    }))
}

// POST /api/auth/logout
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses((status = 204, description = "Sessão encerrada")),
    security(("api_jwt" = []))
)]
pub async fn logout(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> impl IntoResponse {
    app_state.session_service.logout().await;
    StatusCode::NO_CONTENT
}

// GET /api/users/me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Usuários",
    responses((status = 200, description = "Usuário autenticado", body = User)),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}
