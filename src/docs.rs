// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Courses ---
        handlers::course::create_course,
        handlers::course::get_published_courses,
        handlers::course::search_courses,
        handlers::course::get_course,
        handlers::course::edit_course,
        handlers::course::toggle_publish,
        handlers::course::delete_course,
        handlers::course::create_lecture,
        handlers::course::get_course_lectures,
        handlers::course::edit_lecture,
        handlers::course::get_lecture,
        handlers::course::remove_lecture,

        // --- Purchases ---
        handlers::purchase::get_purchased_courses,
        handlers::purchase::create_purchase,

        // --- Dashboard ---
        handlers::dashboard::get_overview,
        handlers::dashboard::aggregate_purchases,
    ),
    components(
        schemas(
            // --- COURSES ---
            models::course::Course,
            models::course::Lecture,
            models::course::PriceSort,
            models::course::MediaCleanup,
            models::course::CourseUpdate,
            models::course::LectureUpdate,
            models::course::PublishResponse,
            handlers::course::CreateCoursePayload,
            handlers::course::EditCoursePayload,
            handlers::course::SearchParams,
            handlers::course::CreateLecturePayload,
            handlers::course::VideoInfo,
            handlers::course::EditLecturePayload,

            // --- PURCHASES ---
            models::purchase::CourseSnapshot,
            models::purchase::PurchaseRecord,
            models::purchase::PurchasedCoursesResponse,
            handlers::purchase::PurchaseListParams,
            handlers::purchase::CreatePurchasePayload,
            models::purchase::PurchaseStatus,

            // --- DASHBOARD ---
            models::dashboard::ChartPoint,
            models::dashboard::PurchaseAggregate,
            models::dashboard::FormattedTotals,
            models::dashboard::DashboardOverview,
        )
    ),
    tags(
        (name = "Courses", description = "Catálogo de cursos e aulas"),
        (name = "Purchases", description = "Compras de cursos concluídas"),
        (name = "Dashboard", description = "Indicadores e Gráficos do Painel Administrativo")
    )
)]
pub struct ApiDoc;

// GET /api-docs/openapi.json
pub async fn openapi_json() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}
