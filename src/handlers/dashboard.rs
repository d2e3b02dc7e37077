// src/handlers/dashboard.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::i18n::Locale,
    // Importamos os models para referenciar no Swagger
    models::{dashboard::DashboardOverview, purchase::PurchasedCoursesResponse},
};

// GET /api/v2/dashboard/overview
#[utoipa::path(
    get,
    path = "/api/v2/dashboard/overview",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Totais de vendas, receita, média por venda, cursos distintos e gráfico de preços", body = DashboardOverview),
        (status = 500, description = "Falha ao buscar as compras")
    ),
    params(
        ("accept-language" = Option<String>, Header, description = "Define o agrupamento da moeda (padrão en-IN)")
    )
)]
pub async fn get_overview(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, AppError> {
    let formatter = locale.currency_formatter(&app_state.currency_symbol);

    let overview = app_state.dashboard_service
        .get_overview(&formatter)
        .await?;

    Ok((StatusCode::OK, Json(overview)))
}

// POST /api/v2/dashboard/aggregate
// Mesmo cálculo do painel, mas sobre uma lista enviada pelo cliente (sem banco)
#[utoipa::path(
    post,
    path = "/api/v2/dashboard/aggregate",
    tag = "Dashboard",
    request_body = PurchasedCoursesResponse,
    responses(
        (status = 200, description = "Agregado da lista enviada", body = DashboardOverview),
        (status = 400, description = "Corpo não é JSON")
    )
)]
pub async fn aggregate_purchases(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<PurchasedCoursesResponse>,
) -> impl IntoResponse {
    tracing::debug!(
        "Agregando {} compras enviadas (idioma: {})",
        payload.purchased_course.len(),
        locale.language()
    );

    let formatter = locale.currency_formatter(&app_state.currency_symbol);
    let overview = app_state.dashboard_service
        .overview_for(&payload.purchased_course, &formatter);

    (StatusCode::OK, Json(overview))
}
