// src/handlers/crm.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, rbac::{GateMaster, RequireRole}},
    models::crm::Client,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "João Pereira")]
    pub name: String,

    #[schema(example = "12345678900")]
    pub document: Option<String>,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "joao@email.com")]
    pub email: Option<String>,

    #[schema(example = "+55 11 98888-7777")]
    pub phone: Option<String>,

    pub notes: Option<String>,
}

// POST /api/clients
#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "Clientes",
    request_body = CreateClientPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Client),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale.0, &app_state.i18n_store))?;

    let client = app_state
        .crm_service
        .create_client(Client {
            id: String::new(), // o store atribui
            tenant_id: String::new(),
            name: payload.name,
            document: payload.document,
            email: payload.email,
            phone: payload.phone,
            notes: payload.notes,
            case_ids: vec![],
        })
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(client)))
}

// GET /api/clients
#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Clientes",
    responses((status = 200, description = "Lista de clientes", body = Vec<Client>)),
    security(("api_jwt" = []))
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let clients = app_state
        .crm_service
        .list_clients()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(clients))
}

// PUT /api/clients/{id}
#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    tag = "Clientes",
    request_body = Client,
    responses(
        (status = 200, description = "Cliente atualizado", body = Client),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    Json(mut client): Json<Client>,
) -> Result<impl IntoResponse, ApiError> {
    // o id da rota manda; o do corpo é ignorado
    client.id = id;

    let updated = app_state
        .crm_service
        .update_client(client)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(updated))
}

// DELETE /api/clients/{id}
#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    tag = "Clientes",
    responses(
        (status = 204, description = "Cliente e dependentes removidos"),
        (status = 403, description = "Apenas o perfil Master exclui clientes")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    locale: Locale,
    _gate: RequireRole<GateMaster>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    // Exclusão em cascata: casos, compromissos e prazos do cliente
    // saem na mesma operação. A confirmação aconteceu no frontend.
    app_state
        .crm_service
        .delete_client(&id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
