// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::cases::{CaseStatus, LegalArea};

// 1. Resumo do painel (Os Cards do Topo)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    // Casos com status diferente de Finalizado
    pub active_cases: usize,
    pub pending_deadlines: usize,
    #[schema(value_type = f64, example = 12.5)]
    pub unbilled_hours: Decimal,
    pub cases_by_status: Vec<StatusCount>,
    pub cases_by_area: Vec<AreaCount>,
    pub monthly_finance: Vec<MonthlyFinanceEntry>,
}

// 2. Histograma por etapa do funil
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: CaseStatus,
    pub total: usize,
}

// 3. Histograma por área do direito
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AreaCount {
    pub area: LegalArea,
    pub total: usize,
}

// 4. Totais financeiros por mês (transações liquidadas)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFinanceEntry {
    #[schema(example = "2024-05")]
    pub month: String,
    #[schema(value_type = f64, example = 8200.0)]
    pub income: Decimal,
    #[schema(value_type = f64, example = 1450.0)]
    pub expense: Decimal,
}
