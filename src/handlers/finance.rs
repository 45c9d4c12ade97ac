// src/handlers/finance.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{GateFinanceiro, RequireRole},
    },
    models::finance::{
        FinancialTransaction, Refund, RefundStatus, TimeEntry, TimeEntryStatus,
        TransactionKind, TransactionStatus,
    },
};

// =============================================================================
//  ÁREA 1: HORAS FATURÁVEIS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeEntryPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "cl-joao")]
    pub client_id: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "case-reclamatoria")]
    pub case_id: String,

    #[schema(value_type = String, format = Date, example = "2024-05-20")]
    pub date: NaiveDate,

    #[validate(range(min = 0.1, message = "positive_hours"))]
    #[schema(value_type = f64, example = 2.5)]
    pub hours: f64,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Elaboração da petição inicial")]
    pub description: String,
}

// POST /api/time-entries
#[utoipa::path(
    post,
    path = "/api/time-entries",
    tag = "Financeiro",
    request_body = CreateTimeEntryPayload,
    responses((status = 201, description = "Lançamento criado", body = TimeEntry)),
    security(("api_jwt" = []))
)]
pub async fn create_time_entry(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateTimeEntryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale.0, &app_state.i18n_store))?;

    let hours = Decimal::try_from(payload.hours)
        .map_err(|e| {
            AppError::InternalServerError(anyhow::anyhow!("horas fora da faixa: {}", e))
                .to_api_error(&locale.0, &app_state.i18n_store)
        })?;

    let entry = app_state
        .finance_service
        .create_time_entry(TimeEntry {
            id: String::new(),
            tenant_id: String::new(),
            user_id: user.id, // quem lança é o usuário da sessão
            client_id: payload.client_id,
            case_id: payload.case_id,
            date: payload.date,
            hours,
            description: payload.description,
            status: TimeEntryStatus::Pendente,
        })
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(entry)))
}

// GET /api/time-entries
#[utoipa::path(
    get,
    path = "/api/time-entries",
    tag = "Financeiro",
    responses((status = 200, description = "Lista de lançamentos", body = Vec<TimeEntry>)),
    security(("api_jwt" = []))
)]
pub async fn list_time_entries(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let entries = app_state
        .finance_service
        .list_time_entries()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(entries))
}

// PUT /api/time-entries/{id}
#[utoipa::path(
    put,
    path = "/api/time-entries/{id}",
    tag = "Financeiro",
    request_body = TimeEntry,
    responses(
        (status = 200, description = "Lançamento atualizado", body = TimeEntry),
        (status = 404, description = "Lançamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_time_entry(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    Json(mut entry): Json<TimeEntry>,
) -> Result<impl IntoResponse, ApiError> {
    entry.id = id;

    let updated = app_state
        .finance_service
        .update_time_entry(entry)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(updated))
}

// DELETE /api/time-entries/{id}
#[utoipa::path(
    delete,
    path = "/api/time-entries/{id}",
    tag = "Financeiro",
    responses((status = 204, description = "Lançamento removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_time_entry(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .finance_service
        .delete_time_entry(&id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// POST /api/time-entries/{id}/bill
#[utoipa::path(
    post,
    path = "/api/time-entries/{id}/bill",
    tag = "Financeiro",
    responses(
        (status = 200, description = "Lançamento faturado", body = TimeEntry),
        (status = 422, description = "Lançamento já faturado")
    ),
    security(("api_jwt" = []))
)]
pub async fn bill_time_entry(
    State(app_state): State<AppState>,
    locale: Locale,
    _gate: RequireRole<GateFinanceiro>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = app_state
        .finance_service
        .bill_time_entry(&id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(entry))
}

// =============================================================================
//  ÁREA 2: TRANSAÇÕES
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionPayload {
    pub kind: TransactionKind,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Honorários - contrato João Pereira")]
    pub description: String,

    #[validate(range(min = 0.01, message = "positive_amount"))]
    #[schema(value_type = f64, example = 5000.0)]
    pub amount: f64,

    #[schema(value_type = String, format = Date, example = "2024-05-15")]
    pub date: NaiveDate,
}

// POST /api/transactions
#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = "Financeiro",
    request_body = CreateTransactionPayload,
    responses((status = 201, description = "Transação criada como Pendente", body = FinancialTransaction)),
    security(("api_jwt" = []))
)]
pub async fn create_transaction(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateTransactionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale.0, &app_state.i18n_store))?;

    let amount = Decimal::try_from(payload.amount)
        .map_err(|e| {
            AppError::InternalServerError(anyhow::anyhow!("valor fora da faixa: {}", e))
                .to_api_error(&locale.0, &app_state.i18n_store)
        })?;

    let transaction = app_state
        .finance_service
        .create_transaction(FinancialTransaction {
            id: String::new(),
            tenant_id: String::new(),
            kind: payload.kind,
            description: payload.description,
            amount,
            date: payload.date,
            user_id: user.id,
            status: TransactionStatus::Pendente,
            approver_id: None,
        })
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

// GET /api/transactions
#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "Financeiro",
    responses((status = 200, description = "Lista de transações", body = Vec<FinancialTransaction>)),
    security(("api_jwt" = []))
)]
pub async fn list_transactions(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let transactions = app_state
        .finance_service
        .list_transactions()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(transactions))
}

// PUT /api/transactions/{id}
#[utoipa::path(
    put,
    path = "/api/transactions/{id}",
    tag = "Financeiro",
    request_body = FinancialTransaction,
    responses(
        (status = 200, description = "Transação atualizada", body = FinancialTransaction),
        (status = 404, description = "Transação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_transaction(
    State(app_state): State<AppState>,
    locale: Locale,
    _gate: RequireRole<GateFinanceiro>,
    Path(id): Path<String>,
    Json(mut transaction): Json<FinancialTransaction>,
) -> Result<impl IntoResponse, ApiError> {
    transaction.id = id;

    let updated = app_state
        .finance_service
        .update_transaction(transaction)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(updated))
}

// DELETE /api/transactions/{id}
#[utoipa::path(
    delete,
    path = "/api/transactions/{id}",
    tag = "Financeiro",
    responses((status = 204, description = "Transação removida")),
    security(("api_jwt" = []))
)]
pub async fn delete_transaction(
    State(app_state): State<AppState>,
    locale: Locale,
    _gate: RequireRole<GateFinanceiro>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .finance_service
        .delete_transaction(&id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// POST /api/transactions/{id}/approve
#[utoipa::path(
    post,
    path = "/api/transactions/{id}/approve",
    tag = "Financeiro",
    responses(
        (status = 200, description = "Transação aprovada", body = FinancialTransaction),
        (status = 422, description = "Transação fora do status Pendente")
    ),
    security(("api_jwt" = []))
)]
pub async fn approve_transaction(
    State(app_state): State<AppState>,
    locale: Locale,
    _gate: RequireRole<GateFinanceiro>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let transaction = app_state
        .finance_service
        .approve_transaction(&id, &user.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(transaction))
}

// POST /api/transactions/{id}/reject
#[utoipa::path(
    post,
    path = "/api/transactions/{id}/reject",
    tag = "Financeiro",
    responses(
        (status = 200, description = "Transação rejeitada", body = FinancialTransaction),
        (status = 422, description = "Transação fora do status Pendente")
    ),
    security(("api_jwt" = []))
)]
pub async fn reject_transaction(
    State(app_state): State<AppState>,
    locale: Locale,
    _gate: RequireRole<GateFinanceiro>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let transaction = app_state
        .finance_service
        .reject_transaction(&id, &user.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(transaction))
}

// POST /api/transactions/{id}/settle
#[utoipa::path(
    post,
    path = "/api/transactions/{id}/settle",
    tag = "Financeiro",
    responses(
        (status = 200, description = "Transação liquidada", body = FinancialTransaction),
        (status = 422, description = "Só transações aprovadas liquidam")
    ),
    security(("api_jwt" = []))
)]
pub async fn settle_transaction(
    State(app_state): State<AppState>,
    locale: Locale,
    _gate: RequireRole<GateFinanceiro>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let transaction = app_state
        .finance_service
        .settle_transaction(&id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(transaction))
}

// =============================================================================
//  ÁREA 3: REEMBOLSOS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRefundPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Deslocamento para audiência")]
    pub description: String,

    #[validate(range(min = 0.01, message = "positive_amount"))]
    #[schema(value_type = f64, example = 180.0)]
    pub amount: f64,

    #[schema(value_type = String, format = Date, example = "2024-05-18")]
    pub date: NaiveDate,

    pub client_id: Option<String>,
    pub case_id: Option<String>,
}

// POST /api/refunds
#[utoipa::path(
    post,
    path = "/api/refunds",
    tag = "Financeiro",
    request_body = CreateRefundPayload,
    responses((status = 201, description = "Reembolso solicitado", body = Refund)),
    security(("api_jwt" = []))
)]
pub async fn create_refund(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateRefundPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale.0, &app_state.i18n_store))?;

    let amount = Decimal::try_from(payload.amount)
        .map_err(|e| {
            AppError::InternalServerError(anyhow::anyhow!("valor fora da faixa: {}", e))
                .to_api_error(&locale.0, &app_state.i18n_store)
        })?;

    let refund = app_state
        .finance_service
        .create_refund(Refund {
            id: String::new(),
            tenant_id: String::new(),
            requester_id: user.id,
            description: payload.description,
            amount,
            date: payload.date,
            status: RefundStatus::Pendente,
            approver_id: None,
            client_id: payload.client_id,
            case_id: payload.case_id,
        })
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(refund)))
}

// GET /api/refunds
#[utoipa::path(
    get,
    path = "/api/refunds",
    tag = "Financeiro",
    responses((status = 200, description = "Lista de reembolsos", body = Vec<Refund>)),
    security(("api_jwt" = []))
)]
pub async fn list_refunds(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let refunds = app_state
        .finance_service
        .list_refunds()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(refunds))
}

// POST /api/refunds/{id}/approve
#[utoipa::path(
    post,
    path = "/api/refunds/{id}/approve",
    tag = "Financeiro",
    responses(
        (status = 200, description = "Reembolso aprovado", body = Refund),
        (status = 422, description = "Reembolso fora do status Pendente")
    ),
    security(("api_jwt" = []))
)]
pub async fn approve_refund(
    State(app_state): State<AppState>,
    locale: Locale,
    _gate: RequireRole<GateFinanceiro>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let refund = app_state
        .finance_service
        .approve_refund(&id, &user.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(refund))
}

// POST /api/refunds/{id}/reject
#[utoipa::path(
    post,
    path = "/api/refunds/{id}/reject",
    tag = "Financeiro",
    responses(
        (status = 200, description = "Reembolso rejeitado", body = Refund),
        (status = 422, description = "Reembolso fora do status Pendente")
    ),
    security(("api_jwt" = []))
)]
pub async fn reject_refund(
    State(app_state): State<AppState>,
    locale: Locale,
    _gate: RequireRole<GateFinanceiro>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let refund = app_state
        .finance_service
        .reject_refund(&id, &user.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(refund))
}

// POST /api/refunds/{id}/pay
#[utoipa::path(
    post,
    path = "/api/refunds/{id}/pay",
    tag = "Financeiro",
    responses(
        (status = 200, description = "Reembolso pago", body = Refund),
        (status = 422, description = "Só reembolsos aprovados são pagos")
    ),
    security(("api_jwt" = []))
)]
pub async fn pay_refund(
    State(app_state): State<AppState>,
    locale: Locale,
    _gate: RequireRole<GateFinanceiro>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let refund = app_state
        .finance_service
        .pay_refund(&id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(refund))
}
