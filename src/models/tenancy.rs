// src/models/tenancy.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---
// Tenant (O "Escritório")
// ---
// A partição isolada de dados de um escritório de advocacia.
// Criado no onboarding; nunca é excluído pela aplicação.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    #[schema(example = "tn-silva")]
    pub id: String,

    #[schema(example = "Silva & Associados")]
    pub name: String,

    // Cor de identidade visual usada pelo frontend
    #[schema(example = "#1E3A8A")]
    pub brand_color: String,
}
