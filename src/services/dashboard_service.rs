// src/services/dashboard_service.rs

use std::{collections::HashSet, sync::Arc};

use rust_decimal::Decimal;

use crate::{
    common::{currency::CurrencyFormatter, error::AppError},
    db::PurchaseStore,
    models::{
        dashboard::{ChartPoint, DashboardOverview, FormattedTotals, PurchaseAggregate},
        purchase::PurchaseRecord,
    },
};

/// Calcula o agregado do painel a partir de uma lista de compras.
///
/// Função pura: registros malformados nunca geram erro. Eles contam em
/// `total_sales`, somam 0 se o valor não for numérico e ficam fora do gráfico
/// se o curso não tiver título ou preço.
pub fn aggregate_purchases(purchases: &[PurchaseRecord]) -> PurchaseAggregate {
    let mut total_revenue = Decimal::ZERO;
    let mut titles: HashSet<&str> = HashSet::new();
    let mut chart_series = Vec::new();

    for purchase in purchases {
        // Soma saturada: para em Decimal::MAX
        total_revenue = total_revenue.saturating_add(purchase.amount.unwrap_or(Decimal::ZERO));

        let Some(course) = purchase.course_id.as_ref() else {
            continue;
        };
        let Some(title) = course.title() else {
            continue;
        };

        titles.insert(title);

        if let Some(price) = course.course_price {
            chart_series.push(ChartPoint {
                name: title.to_string(),
                price,
            });
        }
    }

    let total_sales = purchases.len();
    let average_revenue_per_sale = if total_sales > 0 {
        total_revenue
            .checked_div(Decimal::from(total_sales))
            .unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    PurchaseAggregate {
        total_sales,
        total_revenue,
        average_revenue_per_sale,
        unique_course_count: titles.len(),
        chart_series,
    }
}

#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn PurchaseStore>,
}

impl DashboardService {
    pub fn new(source: Arc<dyn PurchaseStore>) -> Self {
        Self { source }
    }

    // Lista crua, no formato que o front consome ({ purchasedCourse: [...] })
    pub async fn list_purchases(&self, limit: Option<i64>) -> Result<Vec<PurchaseRecord>, AppError> {
        self.source.completed_purchases(limit).await
    }

    /// Busca as compras e monta o painel. Se a busca falhar o agregador nem é chamado.
    pub async fn get_overview(&self, formatter: &CurrencyFormatter) -> Result<DashboardOverview, AppError> {
        let purchases = self.source.completed_purchases(None).await?;
        tracing::debug!("📊 {} compras carregadas para o painel", purchases.len());

        Ok(self.overview_for(&purchases, formatter))
    }

    pub fn overview_for(&self, purchases: &[PurchaseRecord], formatter: &CurrencyFormatter) -> DashboardOverview {
        let aggregate = aggregate_purchases(purchases);

        let skipped = aggregate.total_sales - aggregate.chart_series.len();
        if skipped > 0 {
            tracing::debug!("{} compras ficaram fora do gráfico (curso sem título ou preço)", skipped);
        }

        let formatted = FormattedTotals {
            total_revenue: formatter.format(aggregate.total_revenue),
            average_revenue_per_sale: formatter.format(aggregate.average_revenue_per_sale),
        };

        DashboardOverview { aggregate, formatted }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::currency::{CurrencyFormatter, DigitGrouping};
    use crate::models::purchase::{CourseSnapshot, NewPurchase};
    use async_trait::async_trait;

    fn purchase(amount: Option<i64>, course: Option<(&str, Option<i64>)>) -> PurchaseRecord {
        PurchaseRecord {
            amount: amount.map(Decimal::from),
            course_id: course.map(|(title, price)| CourseSnapshot {
                id: None,
                course_title: Some(title.to_string()),
                course_price: price.map(Decimal::from),
            }),
            ..Default::default()
        }
    }

    struct FixedSource(Vec<PurchaseRecord>);

    #[async_trait]
    impl PurchaseStore for FixedSource {
        async fn completed_purchases(&self, limit: Option<i64>) -> Result<Vec<PurchaseRecord>, AppError> {
            let take = limit.map(|l| l as usize).unwrap_or(self.0.len());
            Ok(self.0.iter().take(take).cloned().collect())
        }

        async fn create_purchase(&self, _purchase: &NewPurchase) -> Result<PurchaseRecord, AppError> {
            unimplemented!("somente leitura")
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl PurchaseStore for BrokenSource {
        async fn completed_purchases(&self, _limit: Option<i64>) -> Result<Vec<PurchaseRecord>, AppError> {
            Err(AppError::InternalServerError(anyhow::anyhow!("conexão recusada")))
        }

        async fn create_purchase(&self, _purchase: &NewPurchase) -> Result<PurchaseRecord, AppError> {
            Err(AppError::InternalServerError(anyhow::anyhow!("conexão recusada")))
        }
    }

    #[test]
    fn aggregates_mixed_purchase_list() {
        let purchases = vec![
            purchase(Some(100), Some(("A", Some(100)))),
            purchase(Some(50), Some(("A", Some(100)))),
            purchase(Some(30), None),
        ];

        let aggregate = aggregate_purchases(&purchases);

        assert_eq!(aggregate.total_sales, 3);
        assert_eq!(aggregate.total_revenue, Decimal::from(180));
        assert_eq!(aggregate.average_revenue_per_sale, Decimal::from(60));
        assert_eq!(aggregate.unique_course_count, 1);
        assert_eq!(
            aggregate.chart_series,
            vec![
                ChartPoint { name: "A".into(), price: Decimal::from(100) },
                ChartPoint { name: "A".into(), price: Decimal::from(100) },
            ]
        );
    }

    #[test]
    fn empty_list_is_all_zeroes() {
        assert_eq!(aggregate_purchases(&[]), PurchaseAggregate::default());
    }

    #[test]
    fn missing_amount_counts_as_sale_with_zero_revenue() {
        let purchases = vec![purchase(None, None), purchase(Some(10), None)];
        let aggregate = aggregate_purchases(&purchases);

        assert_eq!(aggregate.total_sales, 2);
        assert_eq!(aggregate.total_revenue, Decimal::from(10));
        assert_eq!(aggregate.average_revenue_per_sale, Decimal::from(5));
        assert!(aggregate.chart_series.is_empty());
    }

    #[test]
    fn course_without_price_counts_as_unique_but_not_charted() {
        let purchases = vec![
            purchase(Some(10), Some(("B", None))),
            purchase(Some(10), Some(("", Some(5)))),
        ];
        let aggregate = aggregate_purchases(&purchases);

        assert_eq!(aggregate.unique_course_count, 1);
        assert!(aggregate.chart_series.is_empty());
    }

    #[test]
    fn revenue_sum_saturates_instead_of_panicking() {
        let purchases = vec![
            PurchaseRecord { amount: Some(Decimal::MAX), ..Default::default() },
            PurchaseRecord { amount: Some(Decimal::MAX), ..Default::default() },
        ];
        let aggregate = aggregate_purchases(&purchases);

        assert_eq!(aggregate.total_revenue, Decimal::MAX);
        assert_eq!(aggregate.total_sales, 2);
    }

    #[test]
    fn huge_amounts_saturate_revenue_and_stay_in_chart() {
        let response: crate::models::purchase::PurchasedCoursesResponse = serde_json::from_value(serde_json::json!({
            "purchasedCourse": [
                { "amount": 1e30, "courseId": { "courseTitle": "Big", "coursePrice": 1e30 } },
                { "amount": 0.1 },
                { "amount": 0.2 }
            ]
        }))
        .unwrap();

        let aggregate = aggregate_purchases(&response.purchased_course);

        assert_eq!(aggregate.total_revenue, Decimal::MAX);
        assert_eq!(aggregate.chart_series.len(), 1);
        assert_eq!(aggregate.chart_series[0].name, "Big");
        assert_eq!(aggregate.chart_series[0].price, Decimal::MAX);
    }

    #[tokio::test]
    async fn overview_formats_totals() {
        let service = DashboardService::new(Arc::new(FixedSource(vec![
            purchase(Some(100), Some(("A", Some(100)))),
            purchase(Some(50), Some(("A", Some(100)))),
            purchase(Some(30), None),
        ])));
        let formatter = CurrencyFormatter::new("₹", DigitGrouping::Indian);

        let overview = service.get_overview(&formatter).await.unwrap();

        assert_eq!(overview.aggregate.total_sales, 3);
        assert_eq!(overview.formatted.total_revenue, "₹180.00");
        assert_eq!(overview.formatted.average_revenue_per_sale, "₹60.00");
    }

    #[tokio::test]
    async fn list_respects_limit() {
        let service = DashboardService::new(Arc::new(FixedSource(vec![
            purchase(Some(1), None),
            purchase(Some(2), None),
        ])));

        let purchases = service.list_purchases(Some(1)).await.unwrap();
        assert_eq!(purchases.len(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_is_propagated() {
        let service = DashboardService::new(Arc::new(BrokenSource));
        let formatter = CurrencyFormatter::new("₹", DigitGrouping::Indian);

        let result = service.get_overview(&formatter).await;
        assert!(matches!(result, Err(AppError::InternalServerError(_))));
    }
}
