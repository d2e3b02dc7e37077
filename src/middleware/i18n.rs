// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::common::currency::{CurrencyFormatter, DEFAULT_LOCALE};

// Extrator de idioma: guarda a tag completa ("en-IN"), a região decide o agrupamento da moeda
#[derive(Debug, Clone)]
pub struct Locale(pub String);

impl Locale {
    // "pt-BR" -> "pt"
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    pub fn currency_formatter(&self, symbol: &str) -> CurrencyFormatter {
        CurrencyFormatter::for_locale(&self.0, symbol)
    }
}

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
                    .into_iter()
                    .next() // Pega o idioma de maior prioridade (ex: "en-IN")
            })
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());

        Ok(Locale(lang))
    }
}
