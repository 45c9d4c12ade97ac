// src/handlers/dashboard.rs

use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::dashboard::DashboardSummary,
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses((status = 200, description = "Indicadores do escritório", body = DashboardSummary)),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state
        .dashboard_service
        .summary()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok(Json(summary))
}
