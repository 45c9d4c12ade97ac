// src/handlers/cases.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
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
    models::cases::{Case, CaseStatus, StageSubmission},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCasePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Reclamatória trabalhista - João Pereira")]
    pub title: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "cl-joao")]
    pub client_id: String,

    #[serde(default)]
    pub responsible_ids: Vec<String>,

    #[schema(value_type = Option<String>, format = Date, example = "2024-08-01")]
    pub due_date: Option<NaiveDate>,
}

// POST /api/cases
#[utoipa::path(
    post,
    path = "/api/cases",
    tag = "Casos",
    request_body = CreateCasePayload,
    responses(
        (status = 201, description = "Caso criado na Identificação do Lead", body = Case),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_case(
    State(app_state): State<AppState>,
    locale: Locale,
    _gate: RequireRole<GateAdvocacia>,
    Json(payload): Json<CreateCasePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale.0, &app_state.i18n_store))?;

    // Todo caso nasce no começo do funil; os campos de etapa são
    // preenchidos pelas submissões.
    let case = app_state
        .case_service
        .create_case(Case {
            id: String::new(),
            tenant_id: String::new(),
            title: payload.title,
            client_id: payload.client_id,
            status: CaseStatus::LeadIdentification,
            responsible_ids: payload.responsible_ids,
            due_date: payload.due_date,
            lead_origin: None,
            lead_notes: None,
            legal_area: None,
            case_value: None,
            urgency: None,
            triage_analysis: None,
            viability: None,
            meeting_date: None,
            meeting_notes: None,
            proposal_fee: None,
            proposal_terms: None,
            document_checklist: None,
            final_opinion: None,
            draft_content: None,
            filing: None,
        })
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(case)))
}

// GET /api/cases
#[utoipa::path(
    get,
    path = "/api/cases",
    tag = "Casos",
    responses((status = 200, description = "Lista de casos", body = Vec<Case>)),
    security(("api_jwt" = []))
)]
pub async fn list_cases(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let cases = app_state
        .case_service
        .list_cases()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(cases))
}

// PUT /api/cases/{id}
#[utoipa::path(
    put,
    path = "/api/cases/{id}",
    tag = "Casos",
    request_body = Case,
    responses(
        (status = 200, description = "Caso atualizado", body = Case),
        (status = 404, description = "Caso não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_case(
    State(app_state): State<AppState>,
    locale: Locale,
    _gate: RequireRole<GateAdvocacia>,
    Path(id): Path<String>,
    Json(mut case): Json<Case>,
) -> Result<impl IntoResponse, ApiError> {
    case.id = id;

    let updated = app_state
        .case_service
        .update_case(case)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(updated))
}

// DELETE /api/cases/{id}
#[utoipa::path(
    delete,
    path = "/api/cases/{id}",
    tag = "Casos",
    responses((status = 204, description = "Caso removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_case(
    State(app_state): State<AppState>,
    locale: Locale,
    _gate: RequireRole<GateAdvocacia>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .case_service
        .delete_case(&id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// POST /api/cases/{id}/advance
#[utoipa::path(
    post,
    path = "/api/cases/{id}/advance",
    tag = "Casos",
    request_body = StageSubmission,
    responses(
        (status = 200, description = "Etapa concluída, caso avançou", body = Case),
        (status = 422, description = "Submissão fora de ordem ou checklist incompleto")
    ),
    security(("api_jwt" = []))
)]
pub async fn advance_stage(
    State(app_state): State<AppState>,
    locale: Locale,
    _gate: RequireRole<GateAdvocacia>,
    Path(id): Path<String>,
    Json(submission): Json<StageSubmission>,
) -> Result<impl IntoResponse, ApiError> {
    let case = app_state
        .case_service
        .advance_stage(&id, submission)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(case))
}
