// src/services/case_service.rs

use crate::{
    common::error::AppError,
    models::cases::{Case, StageSubmission},
    services::lifecycle,
    store::TenantStore,
};

#[derive(Clone)]
pub struct CaseService {
    store: TenantStore,
}

impl CaseService {
    pub fn new(store: TenantStore) -> Self {
        Self { store }
    }

    pub async fn create_case(&self, case: Case) -> Result<Case, AppError> {
        self.store.add_case(case).await
    }

    pub async fn list_cases(&self) -> Result<Vec<Case>, AppError> {
        self.store.list().await
    }

    pub async fn update_case(&self, case: Case) -> Result<Case, AppError> {
        self.store.update(case).await
    }

    pub async fn delete_case(&self, id: &str) -> Result<(), AppError> {
        self.store.remove_case(id).await
    }

    /// Conclui a etapa atual do caso com o payload submetido. A
    /// validação da transição e o merge acontecem dentro da mesma
    /// mutação que publica o snapshot — ou tudo, ou nada.
    pub async fn advance_stage(
        &self,
        case_id: &str,
        submission: StageSubmission,
    ) -> Result<Case, AppError> {
        let case_id = case_id.to_owned();
        self.store
            .mutate(move |snap| {
                let slot = snap
                    .cases
                    .iter_mut()
                    .find(|case| case.id == case_id)
                    .ok_or(AppError::NotFound("caso"))?;
                let updated = lifecycle::advance(slot, submission)?;
                *slot = updated.clone();
                Ok(updated)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::cases::{CaseStatus, LegalArea, Urgency},
        store::seed,
    };
    use rust_decimal::Decimal;

    async fn service() -> CaseService {
        let directory = seed::demo_directory().unwrap();
        let tenant = directory.tenant_by_id("tn-silva").unwrap();
        let store = TenantStore::new();
        store.activate(directory.snapshot_for(&tenant)).await;
        CaseService::new(store)
    }

    #[tokio::test]
    async fn advance_merges_payload_and_moves_one_stage() {
        let svc = service().await;

        // case-rescisao está em Qualificação no seed
        let submission = StageSubmission::Qualification {
            legal_area: LegalArea::Trabalhista,
            case_value: Decimal::from(12_000),
            urgency: Urgency::Media,
        };
        let updated = svc.advance_stage("case-rescisao", submission).await.unwrap();

        assert_eq!(updated.status, CaseStatus::Triage);
        assert_eq!(updated.legal_area, Some(LegalArea::Trabalhista));

        // a mudança está publicada no snapshot
        let cases = svc.list_cases().await.unwrap();
        let stored = cases.iter().find(|c| c.id == "case-rescisao").unwrap();
        assert_eq!(stored.status, CaseStatus::Triage);
    }

    #[tokio::test]
    async fn failed_advance_publishes_nothing() {
        let svc = service().await;

        // submissão de etapa errada para case-rescisao (Qualificação)
        let wrong = StageSubmission::Draft {
            content: "Petição...".into(),
        };
        let err = svc.advance_stage("case-rescisao", wrong).await;
        assert!(matches!(err, Err(AppError::StageOutOfOrder)));

        let cases = svc.list_cases().await.unwrap();
        let stored = cases.iter().find(|c| c.id == "case-rescisao").unwrap();
        assert_eq!(stored.status, CaseStatus::Qualification);
        assert!(stored.draft_content.is_none());
    }

    #[tokio::test]
    async fn advance_of_unknown_case_is_not_found() {
        let svc = service().await;
        let err = svc
            .advance_stage(
                "case-inexistente",
                StageSubmission::Lead {
                    origin: "Site".into(),
                    notes: None,
                },
            )
            .await;
        assert!(matches!(err, Err(AppError::NotFound(_))));
    }
}
