// src/services/dashboard_service.rs

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    models::{
        agenda::DeadlineStatus,
        cases::{CaseStatus, LegalArea},
        dashboard::{AreaCount, DashboardSummary, MonthlyFinanceEntry, StatusCount},
        finance::{TimeEntryStatus, TransactionKind, TransactionStatus},
    },
    store::{TenantSnapshot, TenantStore},
};

// Visão derivada: contagens e somas do painel gerencial. Puramente
// uma redução do snapshot — nada aqui muta o store.
pub fn build_summary(snapshot: &TenantSnapshot) -> DashboardSummary {
    // Finalizado sai dos "ativos", mas continua no acervo (e nos
    // histogramas abaixo).
    let active_cases = snapshot
        .cases
        .iter()
        .filter(|case| !case.status.is_terminal())
        .count();

    let cases_by_status = CaseStatus::ALL
        .iter()
        .map(|status| StatusCount {
            status: *status,
            total: snapshot
                .cases
                .iter()
                .filter(|case| case.status == *status)
                .count(),
        })
        .collect();

    let cases_by_area = LegalArea::ALL
        .iter()
        .map(|area| AreaCount {
            area: *area,
            total: snapshot
                .cases
                .iter()
                .filter(|case| case.legal_area == Some(*area))
                .count(),
        })
        .collect();

    // Totais mensais sobre transações liquidadas, chave "yyyy-MM".
    let mut months: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for tx in snapshot
        .transactions
        .iter()
        .filter(|tx| tx.status == TransactionStatus::Liquidado)
    {
        let entry = months
            .entry(tx.date.format("%Y-%m").to_string())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match tx.kind {
            TransactionKind::Receita => entry.0 += tx.amount,
            TransactionKind::Despesa => entry.1 += tx.amount,
        }
    }
    let monthly_finance = months
        .into_iter()
        .map(|(month, (income, expense))| MonthlyFinanceEntry {
            month,
            income,
            expense,
        })
        .collect();

    let pending_deadlines = snapshot
        .deadlines
        .iter()
        .filter(|deadline| deadline.status == DeadlineStatus::Pendente)
        .count();

    let unbilled_hours = snapshot
        .time_entries
        .iter()
        .filter(|entry| entry.status == TimeEntryStatus::Pendente)
        .map(|entry| entry.hours)
        .sum();

    DashboardSummary {
        active_cases,
        pending_deadlines,
        unbilled_hours,
        cases_by_status,
        cases_by_area,
        monthly_finance,
    }
}

#[derive(Clone)]
pub struct DashboardService {
    store: TenantStore,
}

impl DashboardService {
    pub fn new(store: TenantStore) -> Self {
        Self { store }
    }

    pub async fn summary(&self) -> Result<DashboardSummary, AppError> {
        let snapshot = self.store.snapshot().await?;
        Ok(build_summary(&snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;

    fn silva_snapshot() -> TenantSnapshot {
        let directory = seed::demo_directory().unwrap();
        let tenant = directory.tenant_by_id("tn-silva").unwrap();
        directory.snapshot_for(&tenant)
    }

    #[test]
    fn counts_and_sums_over_the_seed() {
        let snapshot = silva_snapshot();
        let summary = build_summary(&snapshot);

        // nenhum caso do seed do tn-silva está Finalizado
        assert_eq!(summary.active_cases, 3);
        assert_eq!(summary.pending_deadlines, 2);
        assert_eq!(summary.unbilled_hours, Decimal::new(25, 1));

        // só a reclamatória tem área definida como Trabalhista; a
        // rescisão ainda não passou da qualificação
        let trabalhista = summary
            .cases_by_area
            .iter()
            .find(|entry| entry.area == LegalArea::Trabalhista)
            .unwrap();
        assert_eq!(trabalhista.total, 1);

        // só a transação liquidada entra no total mensal
        assert_eq!(summary.monthly_finance.len(), 1);
        let may = &summary.monthly_finance[0];
        assert_eq!(may.month, "2024-05");
        assert_eq!(may.income, Decimal::from(5_000));
        assert_eq!(may.expense, Decimal::ZERO);
    }

    #[test]
    fn closed_cases_leave_active_count_but_not_histogram() {
        let mut snapshot = silva_snapshot();
        snapshot.cases[0].status = CaseStatus::Closed;

        let summary = build_summary(&snapshot);
        assert_eq!(summary.active_cases, 2);

        let closed = summary
            .cases_by_status
            .iter()
            .find(|entry| entry.status == CaseStatus::Closed)
            .unwrap();
        assert_eq!(closed.total, 1);
    }

    #[test]
    fn builder_is_pure() {
        let snapshot = silva_snapshot();
        assert_eq!(build_summary(&snapshot), build_summary(&snapshot));
    }
}
