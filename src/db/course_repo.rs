// src/db/course_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::course::{Course, CourseChanges, CourseFilter, Lecture, LectureChanges, NewCourse},
};

/// Catálogo de cursos e aulas. Métodos de busca por id devolvem `None` quando não existe;
/// quem decide se isso vira 404 é o serviço.
#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn create_course(&self, course: &NewCourse) -> Result<Course, AppError>;
    async fn find_course(&self, id: Uuid) -> Result<Option<Course>, AppError>;
    async fn search_courses(&self, filter: &CourseFilter) -> Result<Vec<Course>, AppError>;
    async fn update_course(&self, id: Uuid, changes: &CourseChanges) -> Result<Option<Course>, AppError>;
    async fn set_published(&self, id: Uuid, published: bool) -> Result<Option<Course>, AppError>;
    async fn delete_course(&self, id: Uuid) -> Result<Option<Course>, AppError>;

    async fn create_lecture(&self, course_id: Uuid, lecture_title: &str) -> Result<Lecture, AppError>;
    async fn course_lectures(&self, course_id: Uuid) -> Result<Vec<Lecture>, AppError>;
    async fn find_lecture(&self, id: Uuid) -> Result<Option<Lecture>, AppError>;
    async fn update_lecture(&self, id: Uuid, changes: &LectureChanges) -> Result<Option<Lecture>, AppError>;
    async fn delete_lecture(&self, id: Uuid) -> Result<Option<Lecture>, AppError>;
}

// Escapa os curingas do ILIKE para a busca ser por texto literal
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[derive(Clone)]
pub struct CourseRepository {
    pool: PgPool,
}

impl CourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseStore for CourseRepository {
    // ---
    // Cursos
    // ---

    async fn create_course(&self, course: &NewCourse) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (course_title, category, course_thumbnail)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
            .bind(&course.course_title)
            .bind(&course.category)
            .bind(course.course_thumbnail.as_deref())
            .fetch_one(&self.pool)
            .await?;

        Ok(course)
    }

    async fn find_course(&self, id: Uuid) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(course)
    }

    // Só cursos publicados. Sem filtro = catálogo publicado inteiro, mais novos primeiro.
    async fn search_courses(&self, filter: &CourseFilter) -> Result<Vec<Course>, AppError> {
        let pattern = filter
            .query
            .as_deref()
            .filter(|q| !q.is_empty())
            .map(like_pattern);

        let courses = sqlx::query_as::<_, Course>(
            r#"
            SELECT * FROM courses
            WHERE is_published = true
              AND ($1::text IS NULL
                   OR course_title ILIKE $1
                   OR sub_title ILIKE $1
                   OR category ILIKE $1)
              AND (cardinality($2::text[]) = 0 OR category = ANY($2))
            ORDER BY
                CASE WHEN $3::text = 'low' THEN course_price END ASC NULLS LAST,
                CASE WHEN $3::text = 'high' THEN course_price END DESC NULLS LAST,
                created_at DESC
            "#,
        )
            .bind(pattern)
            .bind(filter.categories.as_slice())
            .bind(filter.sort_by_price.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await?;

        Ok(courses)
    }

    async fn update_course(&self, id: Uuid, changes: &CourseChanges) -> Result<Option<Course>, AppError> {
        // COALESCE: campo não enviado mantém o valor atual
        let course = sqlx::query_as::<_, Course>(
            r#"
            UPDATE courses SET
                course_title     = COALESCE($2, course_title),
                sub_title        = COALESCE($3, sub_title),
                description      = COALESCE($4, description),
                category         = COALESCE($5, category),
                course_level     = COALESCE($6, course_level),
                course_price     = COALESCE($7, course_price),
                course_thumbnail = COALESCE($8, course_thumbnail)
            WHERE id = $1
            RETURNING *
            "#,
        )
            .bind(id)
            .bind(changes.course_title.as_deref())
            .bind(changes.sub_title.as_deref())
            .bind(changes.description.as_deref())
            .bind(changes.category.as_deref())
            .bind(changes.course_level.as_deref())
            .bind(changes.course_price)
            .bind(changes.course_thumbnail.as_deref())
            .fetch_optional(&self.pool)
            .await?;

        Ok(course)
    }

    async fn set_published(&self, id: Uuid, published: bool) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>(
            "UPDATE courses SET is_published = $2 WHERE id = $1 RETURNING *",
        )
            .bind(id)
            .bind(published)
            .fetch_optional(&self.pool)
            .await?;

        Ok(course)
    }

    // As aulas vão junto (ON DELETE CASCADE)
    async fn delete_course(&self, id: Uuid) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>("DELETE FROM courses WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(course)
    }

    // ---
    // Aulas
    // ---

    async fn create_lecture(&self, course_id: Uuid, lecture_title: &str) -> Result<Lecture, AppError> {
        let lecture = sqlx::query_as::<_, Lecture>(
            r#"
            INSERT INTO lectures (course_id, lecture_title)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
            .bind(course_id)
            .bind(lecture_title)
            .fetch_one(&self.pool)
            .await?;

        Ok(lecture)
    }

    async fn course_lectures(&self, course_id: Uuid) -> Result<Vec<Lecture>, AppError> {
        let lectures = sqlx::query_as::<_, Lecture>(
            "SELECT * FROM lectures WHERE course_id = $1 ORDER BY created_at ASC, id ASC",
        )
            .bind(course_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(lectures)
    }

    async fn find_lecture(&self, id: Uuid) -> Result<Option<Lecture>, AppError> {
        let lecture = sqlx::query_as::<_, Lecture>("SELECT * FROM lectures WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(lecture)
    }

    async fn update_lecture(&self, id: Uuid, changes: &LectureChanges) -> Result<Option<Lecture>, AppError> {
        let lecture = sqlx::query_as::<_, Lecture>(
            r#"
            UPDATE lectures SET
                lecture_title   = COALESCE($2, lecture_title),
                video_url       = COALESCE($3, video_url),
                public_id       = COALESCE($4, public_id),
                is_preview_free = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
            .bind(id)
            .bind(changes.lecture_title.as_deref())
            .bind(changes.video_url.as_deref())
            .bind(changes.public_id.as_deref())
            .bind(changes.is_preview_free)
            .fetch_optional(&self.pool)
            .await?;

        Ok(lecture)
    }

    async fn delete_lecture(&self, id: Uuid) -> Result<Option<Lecture>, AppError> {
        let lecture = sqlx::query_as::<_, Lecture>("DELETE FROM lectures WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(lecture)
    }
}
