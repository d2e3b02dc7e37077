// src/db/purchase_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::purchase::{CourseSnapshot, NewPurchase, PurchaseRecord},
};

/// Onde as compras ficam guardadas. O Postgres em produção, uma lista em memória nos testes.
#[async_trait]
pub trait PurchaseStore: Send + Sync {
    /// Compras concluídas, com o snapshot do curso, na ordem em que foram criadas.
    async fn completed_purchases(&self, limit: Option<i64>) -> Result<Vec<PurchaseRecord>, AppError>;

    /// Grava a compra e devolve já com o snapshot do curso.
    async fn create_purchase(&self, purchase: &NewPurchase) -> Result<PurchaseRecord, AppError>;
}

// Linha crua do JOIN. O LEFT JOIN deixa as colunas do curso nulas quando ele sumiu.
#[derive(Debug, FromRow)]
struct PurchaseRow {
    id: Uuid,
    amount: Option<Decimal>,
    status: String,
    created_at: DateTime<Utc>,
    course_id: Option<Uuid>,
    course_title: Option<String>,
    course_price: Option<Decimal>,
}

impl From<PurchaseRow> for PurchaseRecord {
    fn from(row: PurchaseRow) -> Self {
        let course = row.course_id.map(|id| CourseSnapshot {
            id: Some(id.to_string()),
            course_title: row.course_title,
            course_price: row.course_price,
        });

        PurchaseRecord {
            id: Some(row.id.to_string()),
            amount: row.amount,
            status: Some(row.status),
            created_at: Some(row.created_at),
            course_id: course,
        }
    }
}

#[derive(Clone)]
pub struct PurchaseRepository {
    pool: PgPool,
}

impl PurchaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PurchaseStore for PurchaseRepository {
    async fn completed_purchases(&self, limit: Option<i64>) -> Result<Vec<PurchaseRecord>, AppError> {
        // LIMIT NULL no Postgres = sem limite
        let rows = sqlx::query_as::<_, PurchaseRow>(
            r#"
            SELECT
                p.id,
                p.amount,
                p.status,
                p.created_at,
                c.id AS course_id,
                c.course_title,
                c.course_price
            FROM course_purchases p
            LEFT JOIN courses c ON c.id = p.course_id
            WHERE p.status = 'completed'
            ORDER BY p.created_at ASC, p.id ASC
            LIMIT $1
            "#,
        )
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(PurchaseRecord::from).collect())
    }

    async fn create_purchase(&self, purchase: &NewPurchase) -> Result<PurchaseRecord, AppError> {
        let row = sqlx::query_as::<_, PurchaseRow>(
            r#"
            WITH inserted AS (
                INSERT INTO course_purchases (course_id, user_id, amount, status, payment_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
            )
            SELECT
                i.id,
                i.amount,
                i.status,
                i.created_at,
                c.id AS course_id,
                c.course_title,
                c.course_price
            FROM inserted i
            LEFT JOIN courses c ON c.id = i.course_id
            "#,
        )
            .bind(purchase.course_id)
            .bind(purchase.user_id)
            .bind(purchase.amount)
            .bind(purchase.status.as_str())
            .bind(purchase.payment_id.as_deref())
            .fetch_one(&self.pool)
            .await?;

        tracing::info!("🛒 Compra {} registrada ({})", row.id, row.status);
        Ok(PurchaseRecord::from(row))
    }
}
