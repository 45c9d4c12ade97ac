// src/services/crm_service.rs

use crate::{common::error::AppError, models::crm::Client, store::TenantStore};

#[derive(Clone)]
pub struct CrmService {
    store: TenantStore,
}

impl CrmService {
    pub fn new(store: TenantStore) -> Self {
        Self { store }
    }

    pub async fn create_client(&self, client: Client) -> Result<Client, AppError> {
        self.store.add(client).await
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        self.store.list().await
    }

    pub async fn update_client(&self, client: Client) -> Result<Client, AppError> {
        self.store.update(client).await
    }

    /// Exclusão destrutiva com cascata (casos, compromissos e prazos do
    /// cliente saem juntos). A confirmação explícita é responsabilidade
    /// de quem chama; aqui a ordem já chega decidida.
    pub async fn delete_client(&self, id: &str) -> Result<(), AppError> {
        self.store.delete_client_cascade(id).await
    }
}
