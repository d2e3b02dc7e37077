// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// 1. Um ponto do gráfico "Preço por curso comprado"
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    #[schema(example = "Rust para iniciantes")]
    pub name: String,
    #[schema(value_type = f64, example = 499.0)]
    pub price: Decimal,
}

// 2. O agregado calculado a partir da lista de compras
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseAggregate {
    pub total_sales: usize,             // Inclui compras malformadas
    #[schema(value_type = f64)]
    pub total_revenue: Decimal,         // Soma só dos valores numéricos
    #[schema(value_type = f64)]
    pub average_revenue_per_sale: Decimal,
    pub unique_course_count: usize,     // Títulos distintos e não vazios
    pub chart_series: Vec<ChartPoint>,  // Na ordem de entrada, com repetições
}

impl Default for PurchaseAggregate {
    fn default() -> Self {
        Self {
            total_sales: 0,
            total_revenue: Decimal::ZERO,
            average_revenue_per_sale: Decimal::ZERO,
            unique_course_count: 0,
            chart_series: Vec::new(),
        }
    }
}

// 3. Valores já formatados como moeda, prontos para os cards
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTotals {
    #[schema(example = "₹1,23,456.00")]
    pub total_revenue: String,
    #[schema(example = "₹499.00")]
    pub average_revenue_per_sale: String,
}

// 4. Resposta completa do painel
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    #[serde(flatten)]
    pub aggregate: PurchaseAggregate,
    pub formatted: FormattedTotals,
}
