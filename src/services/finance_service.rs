// src/services/finance_service.rs

use crate::{
    common::error::AppError,
    models::finance::{
        FinancialTransaction, Refund, RefundStatus, TimeEntry, TimeEntryStatus,
        TransactionStatus,
    },
    store::TenantStore,
};

// O financeiro do escritório: horas faturáveis, transações com fluxo
// de aprovação e reembolsos. As transições de status válidas moram
// aqui; o store só conhece replace-by-id.
#[derive(Clone)]
pub struct FinanceService {
    store: TenantStore,
}

impl FinanceService {
    pub fn new(store: TenantStore) -> Self {
        Self { store }
    }

    // --- HORAS ---

    pub async fn create_time_entry(&self, entry: TimeEntry) -> Result<TimeEntry, AppError> {
        self.store.add(entry).await
    }

    pub async fn list_time_entries(&self) -> Result<Vec<TimeEntry>, AppError> {
        self.store.list().await
    }

    pub async fn update_time_entry(&self, entry: TimeEntry) -> Result<TimeEntry, AppError> {
        self.store.update(entry).await
    }

    pub async fn delete_time_entry(&self, id: &str) -> Result<(), AppError> {
        self.store.remove::<TimeEntry>(id).await
    }

    /// Marca o lançamento como faturado.
    pub async fn bill_time_entry(&self, id: &str) -> Result<TimeEntry, AppError> {
        let id = id.to_owned();
        self.store
            .mutate(move |snap| {
                let entry = snap
                    .time_entries
                    .iter_mut()
                    .find(|entry| entry.id == id)
                    .ok_or(AppError::NotFound("lançamento de horas"))?;
                if entry.status == TimeEntryStatus::Faturado {
                    return Err(AppError::ForbiddenTransition);
                }
                entry.status = TimeEntryStatus::Faturado;
                Ok(entry.clone())
            })
            .await
    }

    // --- TRANSAÇÕES ---

    pub async fn create_transaction(
        &self,
        transaction: FinancialTransaction,
    ) -> Result<FinancialTransaction, AppError> {
        self.store.add(transaction).await
    }

    pub async fn list_transactions(&self) -> Result<Vec<FinancialTransaction>, AppError> {
        self.store.list().await
    }

    pub async fn update_transaction(
        &self,
        transaction: FinancialTransaction,
    ) -> Result<FinancialTransaction, AppError> {
        self.store.update(transaction).await
    }

    pub async fn delete_transaction(&self, id: &str) -> Result<(), AppError> {
        self.store.remove::<FinancialTransaction>(id).await
    }

    /// Pendente -> Aprovado, registrando quem aprovou.
    pub async fn approve_transaction(
        &self,
        id: &str,
        approver_id: &str,
    ) -> Result<FinancialTransaction, AppError> {
        self.transition_transaction(
            id,
            Some(approver_id),
            TransactionStatus::Pendente,
            TransactionStatus::Aprovado,
        )
        .await
    }

    /// Pendente -> Rejeitado, registrando quem rejeitou.
    pub async fn reject_transaction(
        &self,
        id: &str,
        approver_id: &str,
    ) -> Result<FinancialTransaction, AppError> {
        self.transition_transaction(
            id,
            Some(approver_id),
            TransactionStatus::Pendente,
            TransactionStatus::Rejeitado,
        )
        .await
    }

    /// Aprovado -> Liquidado.
    pub async fn settle_transaction(&self, id: &str) -> Result<FinancialTransaction, AppError> {
        self.transition_transaction(id, None, TransactionStatus::Aprovado, TransactionStatus::Liquidado)
            .await
    }

    async fn transition_transaction(
        &self,
        id: &str,
        approver_id: Option<&str>,
        expected: TransactionStatus,
        target: TransactionStatus,
    ) -> Result<FinancialTransaction, AppError> {
        let id = id.to_owned();
        let approver_id = approver_id.map(str::to_owned);
        self.store
            .mutate(move |snap| {
                let transaction = snap
                    .transactions
                    .iter_mut()
                    .find(|tx| tx.id == id)
                    .ok_or(AppError::NotFound("transação"))?;
                if transaction.status != expected {
                    return Err(AppError::ForbiddenTransition);
                }
                transaction.status = target;
                if approver_id.is_some() {
                    transaction.approver_id = approver_id;
                }
                Ok(transaction.clone())
            })
            .await
    }

    // --- REEMBOLSOS ---

    pub async fn create_refund(&self, refund: Refund) -> Result<Refund, AppError> {
        self.store.add(refund).await
    }

    pub async fn list_refunds(&self) -> Result<Vec<Refund>, AppError> {
        self.store.list().await
    }

    /// Pendente -> Aprovado.
    pub async fn approve_refund(&self, id: &str, approver_id: &str) -> Result<Refund, AppError> {
        self.transition_refund(id, Some(approver_id), RefundStatus::Pendente, RefundStatus::Aprovado)
            .await
    }

    /// Pendente -> Rejeitado.
    pub async fn reject_refund(&self, id: &str, approver_id: &str) -> Result<Refund, AppError> {
        self.transition_refund(id, Some(approver_id), RefundStatus::Pendente, RefundStatus::Rejeitado)
            .await
    }

    /// Aprovado -> Pago.
    pub async fn pay_refund(&self, id: &str) -> Result<Refund, AppError> {
        self.transition_refund(id, None, RefundStatus::Aprovado, RefundStatus::Pago)
            .await
    }

    async fn transition_refund(
        &self,
        id: &str,
        approver_id: Option<&str>,
        expected: RefundStatus,
        target: RefundStatus,
    ) -> Result<Refund, AppError> {
        let id = id.to_owned();
        let approver_id = approver_id.map(str::to_owned);
        self.store
            .mutate(move |snap| {
                let refund = snap
                    .refunds
                    .iter_mut()
                    .find(|refund| refund.id == id)
                    .ok_or(AppError::NotFound("reembolso"))?;
                if refund.status != expected {
                    return Err(AppError::ForbiddenTransition);
                }
                refund.status = target;
                if approver_id.is_some() {
                    refund.approver_id = approver_id;
                }
                Ok(refund.clone())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;

    async fn service() -> FinanceService {
        let directory = seed::demo_directory().unwrap();
        let tenant = directory.tenant_by_id("tn-silva").unwrap();
        let store = TenantStore::new();
        store.activate(directory.snapshot_for(&tenant)).await;
        FinanceService::new(store)
    }

    #[tokio::test]
    async fn transaction_approval_flow() {
        let svc = service().await;

        // fin-custas está Pendente no seed
        let approved = svc
            .approve_transaction("fin-custas", "user-helena")
            .await
            .unwrap();
        assert_eq!(approved.status, TransactionStatus::Aprovado);
        assert_eq!(approved.approver_id.as_deref(), Some("user-helena"));

        let settled = svc.settle_transaction("fin-custas").await.unwrap();
        assert_eq!(settled.status, TransactionStatus::Liquidado);

        // liquidar de novo não é uma transição válida
        let err = svc.settle_transaction("fin-custas").await;
        assert!(matches!(err, Err(AppError::ForbiddenTransition)));
    }

    #[tokio::test]
    async fn cannot_settle_a_pending_transaction() {
        let svc = service().await;
        let tx = FinancialTransaction {
            id: String::new(),
            tenant_id: String::new(),
            kind: crate::models::finance::TransactionKind::Despesa,
            description: "Cartório".into(),
            amount: rust_decimal::Decimal::from(90),
            date: chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            user_id: "user-livia".into(),
            status: TransactionStatus::Pendente,
            approver_id: None,
        };
        let created = svc.create_transaction(tx).await.unwrap();
        assert!(created.id.starts_with("fin-"));

        let err = svc.settle_transaction(&created.id).await;
        assert!(matches!(err, Err(AppError::ForbiddenTransition)));
    }

    #[tokio::test]
    async fn refund_flow_reaches_paid() {
        let svc = service().await;

        let approved = svc
            .approve_refund("ref-deslocamento", "user-helena")
            .await
            .unwrap();
        assert_eq!(approved.status, RefundStatus::Aprovado);

        let paid = svc.pay_refund("ref-deslocamento").await.unwrap();
        assert_eq!(paid.status, RefundStatus::Pago);

        // rejeitar depois de pago não existe
        let err = svc.reject_refund("ref-deslocamento", "user-helena").await;
        assert!(matches!(err, Err(AppError::ForbiddenTransition)));
    }

    #[tokio::test]
    async fn billing_a_time_entry_is_one_way() {
        let svc = service().await;

        let billed = svc.bill_time_entry("te-1").await.unwrap();
        assert_eq!(billed.status, TimeEntryStatus::Faturado);

        let err = svc.bill_time_entry("te-1").await;
        assert!(matches!(err, Err(AppError::ForbiddenTransition)));
    }
}
