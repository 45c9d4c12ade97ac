// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

// Extrator de idioma do pedido. O produto é pt-BR por padrão; quem
// mandar Accept-Language ganha a resposta no idioma pedido.
pub struct Locale(pub String);

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let lang = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|header_str| {
                accept_language::parse(header_str)
                    .first()
                    .map(|tag_string| {
                        // "pt-BR" -> "pt"; "en" -> "en"
                        tag_string
                            .split('-')
                            .next()
                            .unwrap_or(tag_string)
                            .to_string()
                    })
            })
            .unwrap_or_else(|| "pt".to_string());

        Ok(Locale(lang))
    }
}
