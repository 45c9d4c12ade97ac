// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::tenancy::Tenant;

// Perfis fixos do produto. O perfil decide quais mutações e telas
// ficam ao alcance do usuário.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Role {
    // Dono do escritório: acesso total dentro do tenant
    Master,
    // Praticante: clientes, casos, agenda e horas
    Advogado,
    // Financeiro: transações, reembolsos e faturamento
    Financeiro,
    // Perfil de plataforma, sem tenant
    SuperAdmin,
}

// Representa um usuário do diretório
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(example = "user-helena")]
    pub id: String,

    // SuperAdmin não pertence a escritório nenhum
    pub tenant_id: Option<String>,

    #[schema(example = "Dra. Helena Silva")]
    pub name: String,

    #[schema(example = "helena@silva.adv.br")]
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub role: Role,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "invalid_email"))]
    #[schema(example = "helena@silva.adv.br")]
    pub email: String,

    #[validate(length(min = 6, message = "min_6"))]
    #[schema(example = "senha123")]
    pub password: String,
}

// Resposta de autenticação: token + usuário + escritório ativado
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
    pub tenant: Option<Tenant>,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (ID do usuário)
    pub exp: usize,  // Expiration time (quando o token expira)
    pub iat: usize,  // Issued At (quando o token foi criado)
}
