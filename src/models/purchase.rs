// src/models/purchase.rs

use chrono::{DateTime, Utc};
use rust_decimal::{prelude::FromPrimitive, Decimal};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

// Os registros chegam "frouxos" (vindos de um banco de documentos ou do corpo da requisição).
// Nenhum registro individual pode derrubar a desserialização: o que não tiver o tipo
// esperado vira `None` e o agregador decide o que fazer.

/// Snapshot do curso anexado à compra (o "populate" do courseId).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseSnapshot {
    #[serde(rename = "_id", default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "loose_string")]
    #[schema(example = "Rust para iniciantes")]
    pub course_title: Option<String>,

    #[serde(default, deserialize_with = "loose_number")]
    #[schema(value_type = Option<f64>, example = 499.0)]
    pub course_price: Option<Decimal>,
}

impl CourseSnapshot {
    /// Título só conta se existir e não for vazio.
    pub fn title(&self) -> Option<&str> {
        self.course_title.as_deref().filter(|t| !t.is_empty())
    }
}

/// Uma compra, como o painel administrativo a recebe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    #[serde(rename = "_id", default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "loose_number")]
    #[schema(value_type = Option<f64>, example = 499.0)]
    pub amount: Option<Decimal>,

    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "loose_datetime", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    // Só um objeto é uma referência resolvível; um id solto (não populado) ou null vira None
    #[serde(default, deserialize_with = "loose_course")]
    pub course_id: Option<CourseSnapshot>,
}

impl PurchaseRecord {
    pub fn course_title(&self) -> Option<&str> {
        self.course_id.as_ref().and_then(CourseSnapshot::title)
    }
}

/// Envelope da consulta de compras: `{ "purchasedCourse": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchasedCoursesResponse {
    // Ausente (ou null) = lista vazia
    #[serde(default, deserialize_with = "loose_list")]
    pub purchased_course: Vec<PurchaseRecord>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    #[default]
    Pending,   // Aguardando pagamento
    Completed, // Paga (é o que entra no painel)
    Failed,
}

impl PurchaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseStatus::Pending => "pending",
            PurchaseStatus::Completed => "completed",
            PurchaseStatus::Failed => "failed",
        }
    }
}

// Dados para registrar uma compra. `amount` já resolvido (preço do curso se o cliente não mandou)
#[derive(Debug, Clone)]
pub struct NewPurchase {
    pub course_id: Uuid,
    pub user_id: Option<Uuid>,
    pub amount: Option<Decimal>,
    pub status: PurchaseStatus,
    pub payment_id: Option<String>,
}

// --- Desserializadores tolerantes ---

/// Só números JSON são numéricos: "100" (string) não é.
fn number_from_json(value: &Value) -> Option<Decimal> {
    let Value::Number(n) = value else {
        return None;
    };

    if let Some(i) = n.as_i64() {
        Some(Decimal::from(i))
    } else if let Some(u) = n.as_u64() {
        Some(Decimal::from(u))
    } else {
        n.as_f64().map(decimal_from_f64)
    }
}

// Fora da faixa do Decimal (~7.9e28) satura em MAX/MIN, igual à soma do agregador
fn decimal_from_f64(f: f64) -> Decimal {
    match Decimal::from_f64(f) {
        Some(d) => d,
        None if f.abs() < 1.0 => Decimal::ZERO,
        None if f.is_sign_negative() => Decimal::MIN,
        None => Decimal::MAX,
    }
}

fn loose_number<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_json))
}

fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn loose_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))),
        _ => Ok(None),
    }
}

fn loose_course<'de, D>(deserializer: D) -> Result<Option<CourseSnapshot>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => Ok(serde_json::from_value(value).ok()),
        _ => Ok(None),
    }
}

fn loose_list<'de, D>(deserializer: D) -> Result<Vec<PurchaseRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items,
        _ => return Ok(Vec::new()),
    };

    // Um elemento que nem objeto é (ex: null) ainda é uma "venda", só que vazia
    Ok(items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect())
}
