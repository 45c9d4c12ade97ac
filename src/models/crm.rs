// src/models/crm.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- CLIENTE ---

// O cliente do escritório. `case_ids` é mantido pelo store: criar ou
// excluir um caso atualiza a lista na mesma mutação.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[schema(example = "cl-joao")]
    pub id: String,

    #[serde(default)]
    #[schema(ignore)]
    pub tenant_id: String,

    #[schema(example = "João Pereira")]
    pub name: String,

    // CPF ou CNPJ, sem máscara
    #[schema(example = "12345678900")]
    pub document: Option<String>,

    #[schema(example = "joao@email.com")]
    pub email: Option<String>,

    #[schema(example = "+55 11 98888-7777")]
    pub phone: Option<String>,

    // Anotações livres da triagem/atendimento
    pub notes: Option<String>,

    #[serde(default)]
    pub case_ids: Vec<String>,
}
