// src/services/purchase_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CourseStore, PurchaseStore},
    models::purchase::{NewPurchase, PurchaseRecord, PurchaseStatus},
};

#[derive(Clone)]
pub struct PurchaseService {
    purchases: Arc<dyn PurchaseStore>,
    courses: Arc<dyn CourseStore>,
}

impl PurchaseService {
    pub fn new(purchases: Arc<dyn PurchaseStore>, courses: Arc<dyn CourseStore>) -> Self {
        Self { purchases, courses }
    }

    /// Registra uma compra de curso. Sem `amount`, cobra o preço atual do curso.
    pub async fn record_purchase(
        &self,
        course_id: Uuid,
        user_id: Option<Uuid>,
        amount: Option<Decimal>,
        status: PurchaseStatus,
        payment_id: Option<String>,
    ) -> Result<PurchaseRecord, AppError> {
        let course = self.courses
            .find_course(course_id)
            .await?
            .ok_or(AppError::CourseNotFound)?;

        let purchase = NewPurchase {
            course_id,
            user_id,
            amount: amount.or(course.course_price),
            status,
            payment_id,
        };

        self.purchases.create_purchase(&purchase).await
    }
}
