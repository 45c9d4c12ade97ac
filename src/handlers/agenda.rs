// src/handlers/agenda.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::{
        agenda::{
            Appointment, AppointmentKind, AppointmentStatus, CalendarDay, Deadline,
            DeadlineStatus, hhmm,
        },
        cases::ChecklistItem,
    },
};

// =============================================================================
//  ÁREA 1: COMPROMISSOS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Audiência de instrução")]
    pub title: String,

    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub date: NaiveDate,

    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "10:00")]
    pub time: NaiveTime,

    pub kind: AppointmentKind,

    #[schema(example = "Fórum Trabalhista - Sala 3")]
    pub location: Option<String>,

    #[serde(default)]
    pub responsible_ids: Vec<String>,

    pub client_id: Option<String>,
}

// POST /api/appointments
#[utoipa::path(
    post,
    path = "/api/appointments",
    tag = "Agenda",
    request_body = CreateAppointmentPayload,
    responses((status = 201, description = "Compromisso criado", body = Appointment)),
    security(("api_jwt" = []))
)]
pub async fn create_appointment(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateAppointmentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale.0, &app_state.i18n_store))?;

    let appointment = app_state
        .agenda_service
        .create_appointment(Appointment {
            id: String::new(),
            tenant_id: String::new(),
            title: payload.title,
            date: payload.date,
            time: payload.time,
            kind: payload.kind,
            status: AppointmentStatus::Agendado,
            location: payload.location,
            responsible_ids: payload.responsible_ids,
            client_id: payload.client_id,
        })
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

// GET /api/appointments
#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = "Agenda",
    responses((status = 200, description = "Lista de compromissos", body = Vec<Appointment>)),
    security(("api_jwt" = []))
)]
pub async fn list_appointments(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let appointments = app_state
        .agenda_service
        .list_appointments()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(appointments))
}

// PUT /api/appointments/{id}
#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    tag = "Agenda",
    request_body = Appointment,
    responses(
        (status = 200, description = "Compromisso atualizado", body = Appointment),
        (status = 404, description = "Compromisso não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_appointment(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    Json(mut appointment): Json<Appointment>,
) -> Result<impl IntoResponse, ApiError> {
    appointment.id = id;

    let updated = app_state
        .agenda_service
        .update_appointment(appointment)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(updated))
}

// DELETE /api/appointments/{id}
#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    tag = "Agenda",
    responses((status = 204, description = "Compromisso removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_appointment(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .agenda_service
        .delete_appointment(&id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ÁREA 2: PRAZOS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeadlinePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Contestação")]
    pub title: String,

    #[schema(example = "0001234-56.2024.5.02.0001")]
    pub case_number: Option<String>,

    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub due_date: NaiveDate,

    pub responsible_id: Option<String>,
    pub client_id: Option<String>,

    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
}

// POST /api/deadlines
#[utoipa::path(
    post,
    path = "/api/deadlines",
    tag = "Agenda",
    request_body = CreateDeadlinePayload,
    responses((status = 201, description = "Prazo criado", body = Deadline)),
    security(("api_jwt" = []))
)]
pub async fn create_deadline(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateDeadlinePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale.0, &app_state.i18n_store))?;

    let deadline = app_state
        .agenda_service
        .create_deadline(Deadline {
            id: String::new(),
            tenant_id: String::new(),
            title: payload.title,
            case_number: payload.case_number,
            due_date: payload.due_date,
            status: DeadlineStatus::Pendente,
            responsible_id: payload.responsible_id,
            client_id: payload.client_id,
            checklist: payload.checklist,
        })
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(deadline)))
}

// GET /api/deadlines
#[utoipa::path(
    get,
    path = "/api/deadlines",
    tag = "Agenda",
    responses((status = 200, description = "Lista de prazos", body = Vec<Deadline>)),
    security(("api_jwt" = []))
)]
pub async fn list_deadlines(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let deadlines = app_state
        .agenda_service
        .list_deadlines()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(deadlines))
}

// PUT /api/deadlines/{id}
#[utoipa::path(
    put,
    path = "/api/deadlines/{id}",
    tag = "Agenda",
    request_body = Deadline,
    responses(
        (status = 200, description = "Prazo atualizado", body = Deadline),
        (status = 404, description = "Prazo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_deadline(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    Json(mut deadline): Json<Deadline>,
) -> Result<impl IntoResponse, ApiError> {
    deadline.id = id;

    let updated = app_state
        .agenda_service
        .update_deadline(deadline)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(updated))
}

// DELETE /api/deadlines/{id}
#[utoipa::path(
    delete,
    path = "/api/deadlines/{id}",
    tag = "Agenda",
    responses((status = 204, description = "Prazo removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_deadline(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .agenda_service
        .delete_deadline(&id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// POST /api/deadlines/{id}/checklist/{item_id}/toggle
#[utoipa::path(
    post,
    path = "/api/deadlines/{id}/checklist/{item_id}/toggle",
    tag = "Agenda",
    responses(
        (status = 200, description = "Item alternado", body = Deadline),
        (status = 404, description = "Prazo ou item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn toggle_checklist_item(
    State(app_state): State<AppState>,
    locale: Locale,
    Path((id, item_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let deadline = app_state
        .agenda_service
        .toggle_checklist_item(&id, &item_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(deadline))
}

// =============================================================================
//  ÁREA 3: CALENDÁRIO (visão derivada)
// =============================================================================

// GET /api/agenda/calendar
#[utoipa::path(
    get,
    path = "/api/agenda/calendar",
    tag = "Agenda",
    responses((status = 200, description = "Compromissos e prazos por dia", body = Vec<CalendarDay>)),
    security(("api_jwt" = []))
)]
pub async fn get_calendar(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let calendar = app_state
        .agenda_service
        .calendar()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(calendar))
}
