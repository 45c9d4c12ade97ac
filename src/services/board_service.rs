// src/services/board_service.rs

use crate::{
    common::error::AppError,
    models::cases::{BoardColumn, CaseStatus},
    services::lifecycle,
    store::{TenantSnapshot, TenantStore},
};

// Visão derivada: casos particionados por status, uma coluna por
// etapa, na ordem fixa do funil. Função pura sobre o snapshot.
pub fn build_board(snapshot: &TenantSnapshot) -> Vec<BoardColumn> {
    CaseStatus::ALL
        .iter()
        .map(|status| BoardColumn {
            status: *status,
            cases: snapshot
                .cases
                .iter()
                .filter(|case| case.status == *status)
                .cloned()
                .collect(),
        })
        .collect()
}

#[derive(Clone)]
pub struct BoardService {
    store: TenantStore,
}

impl BoardService {
    pub fn new(store: TenantStore) -> Self {
        Self { store }
    }

    pub async fn board(&self) -> Result<Vec<BoardColumn>, AppError> {
        let snapshot = self.store.snapshot().await?;
        Ok(build_board(&snapshot))
    }

    /// Intenção de arrasto do board. A validação é toda da máquina de
    /// estados (`lifecycle::reassign`); aqui só se aplica o resultado.
    pub async fn move_case(
        &self,
        case_id: &str,
        from: CaseStatus,
        to: CaseStatus,
    ) -> Result<(), AppError> {
        // movimento nulo: ignorado sem publicar snapshot novo
        if from == to {
            return Ok(());
        }

        let case_id = case_id.to_owned();
        self.store
            .mutate(move |snap| {
                let slot = snap
                    .cases
                    .iter_mut()
                    .find(|case| case.id == case_id)
                    .ok_or(AppError::NotFound("caso"))?;
                if let Some(updated) = lifecycle::reassign(slot, from, to)? {
                    *slot = updated;
                }
                Ok(())
            })
            .await
    }
}
