// src/common/currency.rs

use rust_decimal::{Decimal, RoundingStrategy};

// Tag usada quando o cliente não manda Accept-Language (o painel nasceu em INR)
pub const DEFAULT_LOCALE: &str = "en-IN";

/// Como os dígitos da parte inteira são agrupados.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitGrouping {
    /// 12,34,567 (primeiro grupo de 3, depois de 2 em 2)
    Indian,
    /// 1,234,567
    Western,
}

impl DigitGrouping {
    /// Escolhe o agrupamento a partir de uma tag BCP 47 ("en-IN", "hi", "pt-BR"...).
    pub fn for_locale(tag: &str) -> Self {
        let mut parts = tag.split(['-', '_']);
        let language = parts.next().unwrap_or_default();
        let region = parts.next().unwrap_or_default();

        if language.eq_ignore_ascii_case("hi") || region.eq_ignore_ascii_case("IN") {
            DigitGrouping::Indian
        } else {
            DigitGrouping::Western
        }
    }
}

/// Formata valores monetários com duas casas decimais, como o painel exibe.
#[derive(Debug, Clone)]
pub struct CurrencyFormatter {
    symbol: String,
    grouping: DigitGrouping,
}

impl CurrencyFormatter {
    pub fn new(symbol: impl Into<String>, grouping: DigitGrouping) -> Self {
        Self { symbol: symbol.into(), grouping }
    }

    pub fn for_locale(tag: &str, symbol: impl Into<String>) -> Self {
        Self::new(symbol, DigitGrouping::for_locale(tag))
    }

    pub fn format(&self, value: Decimal) -> String {
        // Mesmo arredondamento do Intl.NumberFormat: meio para longe do zero
        let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
        let plain = rounded.abs().to_string();
        let (integer, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        format!("{}{}{}.{}", sign, self.symbol, group_digits(integer, self.grouping), fraction)
    }
}

fn group_digits(integer: &str, grouping: DigitGrouping) -> String {
    if integer.len() <= 3 {
        return integer.to_string();
    }

    let (head, last_three) = integer.split_at(integer.len() - 3);
    let group_size = match grouping {
        DigitGrouping::Indian => 2,
        DigitGrouping::Western => 3,
    };

    // Monta os grupos da direita para a esquerda
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(group_size);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(last_three);

    groups.join(",")
}
