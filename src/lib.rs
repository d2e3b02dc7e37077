// src/lib.rs

use axum::{
    routing::{get, patch, post, put},
    Router,
};

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use crate::config::AppState;

// Monta o router completo. Fica fora do main para os testes conseguirem usar.
pub fn build_router(app_state: AppState) -> Router {
    let course_routes = Router::new()
        .route("/", post(handlers::course::create_course).get(handlers::course::get_published_courses))
        .route("/search", get(handlers::course::search_courses))
        .route(
            "/{course_id}",
            get(handlers::course::get_course)
                .put(handlers::course::edit_course)
                .delete(handlers::course::delete_course),
        )
        .route("/{course_id}/publish", patch(handlers::course::toggle_publish))
        .route(
            "/{course_id}/lecture",
            post(handlers::course::create_lecture).get(handlers::course::get_course_lectures),
        )
        .route("/{course_id}/lecture/{lecture_id}", put(handlers::course::edit_lecture));

    let lecture_routes = Router::new()
        .route(
            "/{lecture_id}",
            get(handlers::course::get_lecture).delete(handlers::course::remove_lecture),
        );

    let purchase_routes = Router::new()
        .route(
            "/",
            get(handlers::purchase::get_purchased_courses).post(handlers::purchase::create_purchase),
        );

    let dashboard_routes = Router::new()
        .route("/overview", get(handlers::dashboard::get_overview))
        .route("/aggregate", post(handlers::dashboard::aggregate_purchases));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .nest("/api/v2/course", course_routes)
        .nest("/api/v2/lecture", lecture_routes)
        .nest("/api/v2/purchase", purchase_routes)
        .nest("/api/v2/dashboard", dashboard_routes)
        .with_state(app_state)
}
