// src/handlers/purchase.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::course::validate_not_negative,
    models::purchase::{PurchaseRecord, PurchaseStatus, PurchasedCoursesResponse},
};

#[derive(Debug, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PurchaseListParams {
    #[validate(range(min = 1, max = 5000, message = "O limite deve estar entre 1 e 5000."))]
    pub limit: Option<i64>,
}

// GET /api/v2/purchase
#[utoipa::path(
    get,
    path = "/api/v2/purchase",
    tag = "Purchases",
    params(PurchaseListParams),
    responses(
        (status = 200, description = "Compras concluídas com o curso populado", body = PurchasedCoursesResponse),
        (status = 400, description = "Parâmetros inválidos"),
        (status = 500, description = "Falha ao buscar as compras")
    )
)]
pub async fn get_purchased_courses(
    State(app_state): State<AppState>,
    Query(params): Query<PurchaseListParams>,
) -> Result<Json<PurchasedCoursesResponse>, AppError> {
    params.validate()?;

    let purchased_course = app_state.dashboard_service
        .list_purchases(params.limit)
        .await?;

    Ok(Json(PurchasedCoursesResponse { purchased_course }))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchasePayload {
    pub course_id: Uuid,

    pub user_id: Option<Uuid>,

    // Sem valor, cobra o preço atual do curso
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = Option<f64>, example = 499.0)]
    pub amount: Option<Decimal>,

    #[serde(default)]
    pub status: PurchaseStatus,

    pub payment_id: Option<String>,
}

// POST /api/v2/purchase
#[utoipa::path(
    post,
    path = "/api/v2/purchase",
    tag = "Purchases",
    request_body = CreatePurchasePayload,
    responses(
        (status = 201, description = "Compra registrada, com o curso populado", body = PurchaseRecord),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Curso não encontrado")
    )
)]
pub async fn create_purchase(
    State(app_state): State<AppState>,
    Json(payload): Json<CreatePurchasePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let purchase = app_state.purchase_service
        .record_purchase(
            payload.course_id,
            payload.user_id,
            payload.amount,
            payload.status,
            payload.payment_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(purchase)))
}
