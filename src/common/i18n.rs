// src/common/i18n.rs

use std::collections::HashMap;

// Frases do sistema em pt (padrão do produto) e en.
// A chave é o "slug" estável que o AppError conhece.
#[derive(Debug, Clone, Copy)]
struct Phrase {
    pt: &'static str,
    en: &'static str,
}

#[derive(Debug, Clone)]
pub struct I18nStore {
    phrases: HashMap<&'static str, Phrase>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut phrases = HashMap::new();

        phrases.insert("validation_failed", Phrase {
            pt: "Um ou mais campos são inválidos.",
            en: "One or more fields are invalid.",
        });
        phrases.insert("invalid_credentials", Phrase {
            pt: "E-mail ou senha inválidos.",
            en: "Invalid e-mail or password.",
        });
        phrases.insert("invalid_token", Phrase {
            pt: "Token de autenticação inválido ou ausente.",
            en: "Authentication token missing or invalid.",
        });
        phrases.insert("no_active_session", Phrase {
            pt: "Nenhuma sessão ativa. Faça login novamente.",
            en: "No active session. Please log in again.",
        });
        phrases.insert("not_found", Phrase {
            pt: "Registro não encontrado.",
            en: "Record not found.",
        });
        phrases.insert("forbidden", Phrase {
            pt: "Seu perfil não permite esta ação.",
            en: "Your role does not allow this action.",
        });
        phrases.insert("stage_out_of_order", Phrase {
            pt: "A submissão não corresponde à etapa atual do caso.",
            en: "The submission does not match the case's current stage.",
        });
        phrases.insert("checklist_incomplete", Phrase {
            pt: "Conclua todos os itens do checklist antes de avançar.",
            en: "Complete every checklist item before advancing.",
        });
        phrases.insert("forbidden_transition", Phrase {
            pt: "Mudança de status não permitida.",
            en: "Status change not allowed.",
        });
        phrases.insert("internal_error", Phrase {
            pt: "Ocorreu um erro inesperado.",
            en: "An unexpected error occurred.",
        });

        Self { phrases }
    }

    /// Resolve uma frase pelo slug. Idiomas desconhecidos caem no inglês;
    /// slugs desconhecidos caem na mensagem genérica de erro interno.
    pub fn msg(&self, lang: &str, key: &str) -> String {
        let phrase = self.phrases.get(key).copied().unwrap_or(Phrase {
            pt: "Ocorreu um erro inesperado.",
            en: "An unexpected error occurred.",
        });

        match lang {
            "pt" => phrase.pt.to_string(),
            _ => phrase.en.to_string(),
        }
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_pt_and_falls_back_to_en() {
        let store = I18nStore::new();
        assert_eq!(store.msg("pt", "not_found"), "Registro não encontrado.");
        assert_eq!(store.msg("de", "not_found"), "Record not found.");
    }

    #[test]
    fn unknown_key_falls_back_to_internal_error() {
        let store = I18nStore::new();
        assert_eq!(store.msg("pt", "nope"), "Ocorreu um erro inesperado.");
    }
}
