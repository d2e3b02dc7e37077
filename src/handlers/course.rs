// src/handlers/course.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    models::course::{
        Course, CourseChanges, CourseFilter, CourseUpdate, Lecture, LectureChanges, LectureUpdate,
        MediaCleanup, NewCourse, PriceSort, PublishResponse,
    },
};

// ---
// Validações customizadas
// ---
pub(crate) fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

const COURSE_LEVELS: [&str; 3] = ["Beginner", "Medium", "Advance"];

fn validate_course_level(level: &str) -> Result<(), ValidationError> {
    if !COURSE_LEVELS.contains(&level) {
        let mut err = ValidationError::new("course_level");
        err.message = Some("O nível deve ser Beginner, Medium ou Advance.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payloads
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCoursePayload {
    #[validate(length(min = 1, message = "O título do curso é obrigatório."))]
    #[schema(example = "Rust para iniciantes")]
    pub course_title: String,

    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    #[schema(example = "Programação")]
    pub category: String,

    #[validate(url(message = "A miniatura deve ser uma URL."))]
    pub course_thumbnail: Option<String>,
}

// Campo ausente = mantém o valor atual
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditCoursePayload {
    #[validate(length(min = 1, message = "O título do curso não pode ser vazio."))]
    pub course_title: Option<String>,

    pub sub_title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,

    #[validate(custom(function = "validate_course_level"))]
    #[schema(example = "Beginner")]
    pub course_level: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = Option<f64>, example = 499.0)]
    pub course_price: Option<Decimal>,

    #[validate(url(message = "A miniatura deve ser uma URL."))]
    pub course_thumbnail: Option<String>,
}

impl From<EditCoursePayload> for CourseChanges {
    fn from(payload: EditCoursePayload) -> Self {
        CourseChanges {
            course_title: payload.course_title,
            sub_title: payload.sub_title,
            description: payload.description,
            category: payload.category,
            course_level: payload.course_level,
            course_price: payload.course_price,
            course_thumbnail: payload.course_thumbnail,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Texto procurado no título, subtítulo e categoria
    pub query: Option<String>,
    /// Categorias separadas por vírgula
    pub categories: Option<String>,
    pub sort_by_price: Option<PriceSort>,
}

impl From<SearchParams> for CourseFilter {
    fn from(params: SearchParams) -> Self {
        let categories = params
            .categories
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect();

        CourseFilter {
            query: params.query.map(|q| q.trim().to_string()),
            categories,
            sort_by_price: params.sort_by_price,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PublishParams {
    /// "true" publica; qualquer outro valor despublica
    pub publish: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLecturePayload {
    #[validate(length(min = 1, message = "O título da aula é obrigatório."))]
    #[schema(example = "Introdução")]
    pub lecture_title: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    #[validate(url(message = "O vídeo deve ser uma URL."))]
    pub video_url: Option<String>,
    pub public_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditLecturePayload {
    #[validate(length(min = 1, message = "O título da aula não pode ser vazio."))]
    pub lecture_title: Option<String>,

    #[validate(nested)]
    pub video_info: Option<VideoInfo>,

    #[serde(default)]
    pub is_preview_free: bool,
}

impl From<EditLecturePayload> for LectureChanges {
    fn from(payload: EditLecturePayload) -> Self {
        let (video_url, public_id) = payload
            .video_info
            .map(|v| (v.video_url, v.public_id))
            .unwrap_or_default();

        LectureChanges {
            lecture_title: payload.lecture_title,
            video_url,
            public_id,
            is_preview_free: payload.is_preview_free,
        }
    }
}

// ---
// Handlers: cursos
// ---

// POST /api/v2/course
#[utoipa::path(
    post,
    path = "/api/v2/course",
    tag = "Courses",
    request_body = CreateCoursePayload,
    responses(
        (status = 201, description = "Curso criado (não publicado)", body = Course),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_course(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCoursePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let course = app_state.course_service
        .create_course(NewCourse {
            course_title: payload.course_title.trim().to_string(),
            category: payload.category.trim().to_string(),
            course_thumbnail: payload.course_thumbnail,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(course)))
}

// GET /api/v2/course
#[utoipa::path(
    get,
    path = "/api/v2/course",
    tag = "Courses",
    responses(
        (status = 200, description = "Cursos publicados, mais novos primeiro", body = Vec<Course>)
    )
)]
pub async fn get_published_courses(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = app_state.course_service.published_courses().await?;
    Ok(Json(courses))
}

// GET /api/v2/course/search
#[utoipa::path(
    get,
    path = "/api/v2/course/search",
    tag = "Courses",
    params(SearchParams),
    responses(
        (status = 200, description = "Cursos publicados que batem com a busca", body = Vec<Course>),
        (status = 400, description = "Ordenação inválida")
    )
)]
pub async fn search_courses(
    State(app_state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = app_state.course_service
        .search_courses(params.into())
        .await?;

    Ok(Json(courses))
}

// GET /api/v2/course/{course_id}
#[utoipa::path(
    get,
    path = "/api/v2/course/{course_id}",
    tag = "Courses",
    params(("course_id" = Uuid, Path, description = "Id do curso")),
    responses(
        (status = 200, body = Course),
        (status = 404, description = "Curso não encontrado")
    )
)]
pub async fn get_course(
    State(app_state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<Course>, AppError> {
    let course = app_state.course_service.get_course(course_id).await?;
    Ok(Json(course))
}

// PUT /api/v2/course/{course_id}
#[utoipa::path(
    put,
    path = "/api/v2/course/{course_id}",
    tag = "Courses",
    params(("course_id" = Uuid, Path, description = "Id do curso")),
    request_body = EditCoursePayload,
    responses(
        (status = 200, description = "Curso atualizado; staleMediaId traz a miniatura substituída", body = CourseUpdate),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Curso não encontrado")
    )
)]
pub async fn edit_course(
    State(app_state): State<AppState>,
    Path(course_id): Path<Uuid>,
    Json(payload): Json<EditCoursePayload>,
) -> Result<Json<CourseUpdate>, AppError> {
    payload.validate()?;

    let update = app_state.course_service
        .edit_course(course_id, payload.into())
        .await?;

    Ok(Json(update))
}

// PATCH /api/v2/course/{course_id}/publish?publish=true
#[utoipa::path(
    patch,
    path = "/api/v2/course/{course_id}/publish",
    tag = "Courses",
    params(("course_id" = Uuid, Path, description = "Id do curso"), PublishParams),
    responses(
        (status = 200, body = PublishResponse),
        (status = 404, description = "Curso não encontrado")
    )
)]
pub async fn toggle_publish(
    State(app_state): State<AppState>,
    Path(course_id): Path<Uuid>,
    Query(params): Query<PublishParams>,
) -> Result<Json<PublishResponse>, AppError> {
    let publish = params.publish.as_deref() == Some("true");

    let course = app_state.course_service
        .set_published(course_id, publish)
        .await?;

    let message = if course.is_published { "Curso publicado." } else { "Curso despublicado." };

    Ok(Json(PublishResponse {
        is_published: course.is_published,
        message: message.to_string(),
    }))
}

// DELETE /api/v2/course/{course_id}
#[utoipa::path(
    delete,
    path = "/api/v2/course/{course_id}",
    tag = "Courses",
    params(("course_id" = Uuid, Path, description = "Id do curso")),
    responses(
        (status = 200, description = "Curso e aulas removidos; staleMediaId traz a miniatura", body = MediaCleanup),
        (status = 404, description = "Curso não encontrado")
    )
)]
pub async fn delete_course(
    State(app_state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<MediaCleanup>, AppError> {
    let cleanup = app_state.course_service.delete_course(course_id).await?;
    Ok(Json(cleanup))
}

// ---
// Handlers: aulas
// ---

// POST /api/v2/course/{course_id}/lecture
#[utoipa::path(
    post,
    path = "/api/v2/course/{course_id}/lecture",
    tag = "Courses",
    params(("course_id" = Uuid, Path, description = "Id do curso")),
    request_body = CreateLecturePayload,
    responses(
        (status = 201, body = Lecture),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Curso não encontrado")
    )
)]
pub async fn create_lecture(
    State(app_state): State<AppState>,
    Path(course_id): Path<Uuid>,
    Json(payload): Json<CreateLecturePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lecture = app_state.course_service
        .create_lecture(course_id, payload.lecture_title.trim())
        .await?;

    Ok((StatusCode::CREATED, Json(lecture)))
}

// GET /api/v2/course/{course_id}/lecture
#[utoipa::path(
    get,
    path = "/api/v2/course/{course_id}/lecture",
    tag = "Courses",
    params(("course_id" = Uuid, Path, description = "Id do curso")),
    responses(
        (status = 200, description = "Aulas na ordem de criação", body = Vec<Lecture>),
        (status = 404, description = "Curso não encontrado")
    )
)]
pub async fn get_course_lectures(
    State(app_state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<Vec<Lecture>>, AppError> {
    let lectures = app_state.course_service.course_lectures(course_id).await?;
    Ok(Json(lectures))
}

// PUT /api/v2/course/{course_id}/lecture/{lecture_id}
#[utoipa::path(
    put,
    path = "/api/v2/course/{course_id}/lecture/{lecture_id}",
    tag = "Courses",
    params(
        ("course_id" = Uuid, Path, description = "Id do curso"),
        ("lecture_id" = Uuid, Path, description = "Id da aula")
    ),
    request_body = EditLecturePayload,
    responses(
        (status = 200, description = "Aula atualizada; staleMediaId traz o vídeo substituído", body = LectureUpdate),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Aula não encontrada neste curso")
    )
)]
pub async fn edit_lecture(
    State(app_state): State<AppState>,
    Path((course_id, lecture_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<EditLecturePayload>,
) -> Result<Json<LectureUpdate>, AppError> {
    payload.validate()?;

    let update = app_state.course_service
        .edit_lecture(course_id, lecture_id, payload.into())
        .await?;

    Ok(Json(update))
}

// GET /api/v2/lecture/{lecture_id}
#[utoipa::path(
    get,
    path = "/api/v2/lecture/{lecture_id}",
    tag = "Courses",
    params(("lecture_id" = Uuid, Path, description = "Id da aula")),
    responses(
        (status = 200, body = Lecture),
        (status = 404, description = "Aula não encontrada")
    )
)]
pub async fn get_lecture(
    State(app_state): State<AppState>,
    Path(lecture_id): Path<Uuid>,
) -> Result<Json<Lecture>, AppError> {
    let lecture = app_state.course_service.get_lecture(lecture_id).await?;
    Ok(Json(lecture))
}

// DELETE /api/v2/lecture/{lecture_id}
#[utoipa::path(
    delete,
    path = "/api/v2/lecture/{lecture_id}",
    tag = "Courses",
    params(("lecture_id" = Uuid, Path, description = "Id da aula")),
    responses(
        (status = 200, description = "Aula removida; staleMediaId traz o vídeo", body = MediaCleanup),
        (status = 404, description = "Aula não encontrada")
    )
)]
pub async fn remove_lecture(
    State(app_state): State<AppState>,
    Path(lecture_id): Path<Uuid>,
) -> Result<Json<MediaCleanup>, AppError> {
    let cleanup = app_state.course_service.remove_lecture(lecture_id).await?;
    Ok(Json(cleanup))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_price_is_rejected() {
        assert!(validate_not_negative(&Decimal::new(-1, 2)).is_err());
        assert!(validate_not_negative(&Decimal::ZERO).is_ok());
    }

    #[test]
    fn only_known_levels_pass() {
        assert!(validate_course_level("Medium").is_ok());
        assert!(validate_course_level("Expert").is_err());
    }

    #[test]
    fn categories_are_split_on_commas() {
        let filter: CourseFilter = SearchParams {
            query: Some("  rust ".into()),
            categories: Some("Backend, Design,,".into()),
            sort_by_price: Some(PriceSort::High),
        }
        .into();

        assert_eq!(filter.query.as_deref(), Some("rust"));
        assert_eq!(filter.categories, vec!["Backend".to_string(), "Design".to_string()]);
        assert_eq!(filter.sort_by_price, Some(PriceSort::High));
    }

    #[test]
    fn lecture_payload_without_video_keeps_media_untouched() {
        let payload: EditLecturePayload =
            serde_json::from_value(serde_json::json!({ "lectureTitle": "Nova" })).unwrap();
        let changes: LectureChanges = payload.into();

        assert_eq!(changes.lecture_title.as_deref(), Some("Nova"));
        assert_eq!(changes.video_url, None);
        assert_eq!(changes.public_id, None);
        assert!(!changes.is_preview_free);
    }
}
