// src/handlers/board.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{GateAdvocacia, RequireRole},
    },
    models::cases::{BoardColumn, CaseStatus},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveCasePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "case-reclamatoria")]
    pub case_id: String,

    #[schema(example = "Instrução")]
    pub from: CaseStatus,

    #[schema(example = "Fase Recursal")]
    pub to: CaseStatus,
}

// GET /api/board
#[utoipa::path(
    get,
    path = "/api/board",
    tag = "Board",
    responses((status = 200, description = "Colunas do board na ordem do funil", body = Vec<BoardColumn>)),
    security(("api_jwt" = []))
)]
pub async fn get_board(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let board = app_state
        .board_service
        .board()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(board))
}

// POST /api/board/move
#[utoipa::path(
    post,
    path = "/api/board/move",
    tag = "Board",
    request_body = MoveCasePayload,
    responses(
        (status = 204, description = "Caso movido (ou movimento nulo ignorado)"),
        (status = 422, description = "Movimento fora do território pós-protocolo")
    ),
    security(("api_jwt" = []))
)]
pub async fn move_case(
    State(app_state): State<AppState>,
    locale: Locale,
    _gate: RequireRole<GateAdvocacia>,
    Json(payload): Json<MoveCasePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale.0, &app_state.i18n_store))?;

    app_state
        .board_service
        .move_case(&payload.case_id, payload.from, payload.to)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
