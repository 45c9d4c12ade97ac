// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

use crate::common::i18n::I18nStore;

// Nosso tipo de erro interno, com `thiserror` para melhor ergonomia.
// A mensagem do `#[error]` é o texto de log; o texto ao cliente sai
// localizado via `to_api_error`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Nenhuma sessão ativa")]
    NoActiveSession,

    #[error("Registro não encontrado: {0}")]
    NotFound(&'static str),

    #[error("Perfil sem permissão para a ação")]
    Forbidden,

    #[error("Submissão fora da etapa atual do caso")]
    StageOutOfOrder,

    #[error("Checklist de documentos incompleto")]
    ChecklistIncomplete,

    #[error("Movimentação de status não permitida")]
    ForbiddenTransition,

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    // Variante genérica para qualquer outro erro inesperado.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

// O erro que atravessa a borda HTTP: status + mensagem já localizada.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    /// Slug estável consultado na tabela de frases.
    fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_failed",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::InvalidToken => "invalid_token",
            AppError::NoActiveSession => "no_active_session",
            AppError::NotFound(_) => "not_found",
            AppError::Forbidden => "forbidden",
            AppError::StageOutOfOrder => "stage_out_of_order",
            AppError::ChecklistIncomplete => "checklist_incomplete",
            AppError::ForbiddenTransition => "forbidden_transition",
            _ => "internal_error",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials
            | AppError::InvalidToken
            | AppError::NoActiveSession => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::StageOutOfOrder
            | AppError::ChecklistIncomplete
            | AppError::ForbiddenTransition => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte para o erro da borda HTTP, localizado no idioma do pedido.
    pub fn to_api_error(&self, lang: &str, i18n: &I18nStore) -> ApiError {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        let details = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut fields = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<Value> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| json!(m.to_string())))
                        .collect();
                    fields.insert(field.to_string(), Value::Array(messages));
                }
                Some(Value::Object(fields))
            }
            AppError::NotFound(resource) => Some(json!({ "resource": resource })),
            _ => None,
        };

        ApiError {
            status,
            error: i18n.msg(lang, self.message_key()),
            details,
        }
    }
}

// Fallback para os pontos (middlewares, extractors) onde não há Locale:
// responde em português, o idioma padrão do produto.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error("pt", &I18nStore::new()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_statuses_by_taxonomy() {
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::NotFound("cliente").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::ChecklistIncomplete.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn localizes_message_by_lang() {
        let i18n = I18nStore::new();
        let api = AppError::InvalidCredentials.to_api_error("en", &i18n);
        assert_eq!(api.error, "Invalid e-mail or password.");
        let api = AppError::InvalidCredentials.to_api_error("pt", &i18n);
        assert_eq!(api.error, "E-mail ou senha inválidos.");
    }
}
