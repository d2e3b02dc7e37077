// src/services/course_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{error::AppError, media::extract_public_id},
    db::CourseStore,
    models::course::{
        Course, CourseChanges, CourseFilter, CourseUpdate, Lecture, LectureChanges, LectureUpdate,
        MediaCleanup, NewCourse,
    },
};

// Miniatura trocada por outra: a antiga fica órfã no host de mídia
fn replaced_thumbnail(current: Option<&str>, incoming: Option<&str>) -> Option<String> {
    match (current, incoming) {
        (Some(old), Some(new)) if old != new => extract_public_id(old),
        _ => None,
    }
}

// Vídeo da aula trocado: o public id antigo fica órfão
fn replaced_video(current: Option<&str>, incoming: Option<&str>) -> Option<String> {
    match (current, incoming) {
        (Some(old), Some(new)) if old != new && !old.is_empty() => Some(old.to_string()),
        _ => None,
    }
}

#[derive(Clone)]
pub struct CourseService {
    store: Arc<dyn CourseStore>,
}

impl CourseService {
    pub fn new(store: Arc<dyn CourseStore>) -> Self {
        Self { store }
    }

    // --- CURSOS ---

    pub async fn create_course(&self, course: NewCourse) -> Result<Course, AppError> {
        let course = self.store.create_course(&course).await?;
        tracing::info!("📚 Curso '{}' criado ({})", course.course_title, course.id);
        Ok(course)
    }

    pub async fn published_courses(&self) -> Result<Vec<Course>, AppError> {
        self.store.search_courses(&CourseFilter::default()).await
    }

    pub async fn search_courses(&self, filter: CourseFilter) -> Result<Vec<Course>, AppError> {
        self.store.search_courses(&filter).await
    }

    pub async fn get_course(&self, id: Uuid) -> Result<Course, AppError> {
        self.store
            .find_course(id)
            .await?
            .ok_or(AppError::CourseNotFound)
    }

    /// Atualiza o curso. Se a miniatura mudou, devolve o public id da antiga para remoção.
    pub async fn edit_course(&self, id: Uuid, changes: CourseChanges) -> Result<CourseUpdate, AppError> {
        let current = self.get_course(id).await?;

        let stale_media_id = replaced_thumbnail(
            current.course_thumbnail.as_deref(),
            changes.course_thumbnail.as_deref(),
        );

        let course = self.store
            .update_course(id, &changes)
            .await?
            .ok_or(AppError::CourseNotFound)?;

        if let Some(public_id) = &stale_media_id {
            tracing::info!("🧹 Miniatura antiga do curso {} para remover: {}", id, public_id);
        }

        Ok(CourseUpdate {
            course,
            cleanup: MediaCleanup { stale_media_id },
        })
    }

    pub async fn set_published(&self, id: Uuid, publish: bool) -> Result<Course, AppError> {
        self.store
            .set_published(id, publish)
            .await?
            .ok_or(AppError::CourseNotFound)
    }

    /// Remove o curso (e as aulas). Devolve o public id da miniatura, se houver.
    pub async fn delete_course(&self, id: Uuid) -> Result<MediaCleanup, AppError> {
        let course = self.store
            .delete_course(id)
            .await?
            .ok_or(AppError::CourseNotFound)?;

        let stale_media_id = course.course_thumbnail.as_deref().and_then(extract_public_id);
        if let Some(public_id) = &stale_media_id {
            tracing::info!("🧹 Curso {} removido, miniatura para remover: {}", id, public_id);
        }

        Ok(MediaCleanup { stale_media_id })
    }

    // --- AULAS ---

    pub async fn create_lecture(&self, course_id: Uuid, lecture_title: &str) -> Result<Lecture, AppError> {
        self.get_course(course_id).await?;
        self.store.create_lecture(course_id, lecture_title).await
    }

    pub async fn course_lectures(&self, course_id: Uuid) -> Result<Vec<Lecture>, AppError> {
        self.get_course(course_id).await?;
        self.store.course_lectures(course_id).await
    }

    pub async fn get_lecture(&self, id: Uuid) -> Result<Lecture, AppError> {
        self.store
            .find_lecture(id)
            .await?
            .ok_or(AppError::LectureNotFound)
    }

    /// A aula precisa ser do curso informado na rota.
    pub async fn edit_lecture(
        &self,
        course_id: Uuid,
        lecture_id: Uuid,
        changes: LectureChanges,
    ) -> Result<LectureUpdate, AppError> {
        let current = self.get_lecture(lecture_id).await?;
        if current.course_id != course_id {
            return Err(AppError::LectureNotFound);
        }

        let stale_media_id = replaced_video(current.public_id.as_deref(), changes.public_id.as_deref());

        let lecture = self.store
            .update_lecture(lecture_id, &changes)
            .await?
            .ok_or(AppError::LectureNotFound)?;

        Ok(LectureUpdate {
            lecture,
            cleanup: MediaCleanup { stale_media_id },
        })
    }

    pub async fn remove_lecture(&self, id: Uuid) -> Result<MediaCleanup, AppError> {
        let lecture = self.store
            .delete_lecture(id)
            .await?
            .ok_or(AppError::LectureNotFound)?;

        let stale_media_id = lecture.public_id.filter(|p| !p.is_empty());
        if let Some(public_id) = &stale_media_id {
            tracing::info!("🧹 Aula {} removida, vídeo para remover: {}", id, public_id);
        }

        Ok(MediaCleanup { stale_media_id })
    }
}
