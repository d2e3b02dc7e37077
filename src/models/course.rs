// src/models/course.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Entidades (tabelas courses e lectures) ---

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: Uuid,

    #[schema(example = "Rust para iniciantes")]
    pub course_title: String,

    pub sub_title: Option<String>,
    pub description: Option<String>,

    #[schema(example = "Programação")]
    pub category: Option<String>,

    #[schema(example = "Beginner")]
    pub course_level: Option<String>,

    #[schema(value_type = Option<f64>, example = 499.0)]
    pub course_price: Option<Decimal>,

    #[schema(example = "https://res.cloudinary.com/demo/image/upload/v1/thumb.jpg")]
    pub course_thumbnail: Option<String>,

    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lecture {
    #[serde(rename = "_id")]
    pub id: Uuid,

    pub course_id: Uuid,

    #[schema(example = "Introdução")]
    pub lecture_title: String,

    pub video_url: Option<String>,

    // Id do vídeo no host de mídia
    pub public_id: Option<String>,

    pub is_preview_free: bool,
    pub created_at: DateTime<Utc>,
}

// --- Entradas dos repositórios ---

#[derive(Debug, Clone, Default)]
pub struct NewCourse {
    pub course_title: String,
    pub category: String,
    pub course_thumbnail: Option<String>,
}

// Campos `None` mantêm o valor atual
#[derive(Debug, Clone, Default)]
pub struct CourseChanges {
    pub course_title: Option<String>,
    pub sub_title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub course_level: Option<String>,
    pub course_price: Option<Decimal>,
    pub course_thumbnail: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LectureChanges {
    pub lecture_title: Option<String>,
    pub video_url: Option<String>,
    pub public_id: Option<String>,
    pub is_preview_free: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PriceSort {
    Low,  // Mais barato primeiro
    High, // Mais caro primeiro
}

impl PriceSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceSort::Low => "low",
            PriceSort::High => "high",
        }
    }
}

// Busca no catálogo publicado
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    pub query: Option<String>,
    pub categories: Vec<String>,
    pub sort_by_price: Option<PriceSort>,
}

impl CourseFilter {
    /// Mesmo critério da busca no banco, para quem filtra em memória.
    pub fn matches(&self, course: &Course) -> bool {
        if !course.is_published {
            return false;
        }

        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            let needle = query.to_lowercase();
            let hit = [Some(&course.course_title), course.sub_title.as_ref(), course.category.as_ref()]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        self.categories.is_empty()
            || course.category.as_ref().is_some_and(|c| self.categories.contains(c))
    }
}

// --- Respostas ---

// Id de mídia que ficou sem dono depois de uma edição/remoção
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaCleanup {
    #[schema(example = "abc123xyz")]
    pub stale_media_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseUpdate {
    pub course: Course,
    #[serde(flatten)]
    pub cleanup: MediaCleanup,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LectureUpdate {
    pub lecture: Lecture,
    #[serde(flatten)]
    pub cleanup: MediaCleanup,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    pub is_published: bool,
    #[schema(example = "Curso publicado.")]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(title: &str, category: Option<&str>, published: bool) -> Course {
        Course {
            id: Uuid::new_v4(),
            course_title: title.to_string(),
            sub_title: None,
            description: None,
            category: category.map(String::from),
            course_level: None,
            course_price: None,
            course_thumbnail: None,
            is_published: published,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn unpublished_courses_never_match() {
        let filter = CourseFilter::default();
        assert!(!filter.matches(&course("Rust", None, false)));
        assert!(filter.matches(&course("Rust", None, true)));
    }

    #[test]
    fn query_is_case_insensitive_over_title_and_category() {
        let filter = CourseFilter { query: Some("rUsT".into()), ..Default::default() };
        assert!(filter.matches(&course("Rust avançado", None, true)));
        assert!(filter.matches(&course("Sistemas", Some("Rust"), true)));
        assert!(!filter.matches(&course("Go", Some("Backend"), true)));
    }

    #[test]
    fn categories_restrict_results() {
        let filter = CourseFilter { categories: vec!["Design".into()], ..Default::default() };
        assert!(filter.matches(&course("Figma", Some("Design"), true)));
        assert!(!filter.matches(&course("Rust", Some("Backend"), true)));
        assert!(!filter.matches(&course("Sem categoria", None, true)));
    }
}
