// tests/common/mod.rs
//
// Catálogo em memória: faz o papel do Postgres nos testes de API.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use coursehub::{
    build_router,
    common::error::AppError,
    config::AppState,
    db::{CourseStore, PurchaseStore},
    models::{
        course::{Course, CourseChanges, CourseFilter, Lecture, LectureChanges, NewCourse, PriceSort},
        purchase::{CourseSnapshot, NewPurchase, PurchaseRecord},
    },
};

struct StoredPurchase {
    id: Uuid,
    course_id: Option<Uuid>,
    amount: Option<Decimal>,
    status: String,
    created_at: DateTime<Utc>,
}

#[derive(Default)]
struct State {
    courses: Vec<Course>,
    lectures: Vec<Lecture>,
    purchases: Vec<StoredPurchase>,
}

impl State {
    // Mesmo LEFT JOIN do repositório: curso removido vira `None`
    fn record(&self, stored: &StoredPurchase) -> PurchaseRecord {
        let course = stored
            .course_id
            .and_then(|id| self.courses.iter().find(|c| c.id == id))
            .map(|c| CourseSnapshot {
                id: Some(c.id.to_string()),
                course_title: Some(c.course_title.clone()),
                course_price: c.course_price,
            });

        PurchaseRecord {
            id: Some(stored.id.to_string()),
            amount: stored.amount,
            status: Some(stored.status.clone()),
            created_at: Some(stored.created_at),
            course_id: course,
        }
    }
}

#[derive(Clone, Default)]
pub struct Catalog {
    state: Arc<Mutex<State>>,
}

#[async_trait]
impl CourseStore for Catalog {
    async fn create_course(&self, course: &NewCourse) -> Result<Course, AppError> {
        let course = Course {
            id: Uuid::new_v4(),
            course_title: course.course_title.clone(),
            sub_title: None,
            description: None,
            category: Some(course.category.clone()),
            course_level: None,
            course_price: None,
            course_thumbnail: course.course_thumbnail.clone(),
            is_published: false,
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().courses.push(course.clone());
        Ok(course)
    }

    async fn find_course(&self, id: Uuid) -> Result<Option<Course>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn search_courses(&self, filter: &CourseFilter) -> Result<Vec<Course>, AppError> {
        let state = self.state.lock().unwrap();

        // Mais novos primeiro; a ordenação por preço é estável por cima disso
        let mut courses: Vec<Course> = state
            .courses
            .iter()
            .rev()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();

        match filter.sort_by_price {
            Some(PriceSort::Low) => courses.sort_by_key(|c| c.course_price.unwrap_or(Decimal::MAX)),
            Some(PriceSort::High) => courses.sort_by_key(|c| std::cmp::Reverse(c.course_price.unwrap_or(Decimal::MIN))),
            None => {}
        }

        Ok(courses)
    }

    async fn update_course(&self, id: Uuid, changes: &CourseChanges) -> Result<Option<Course>, AppError> {
        let mut state = self.state.lock().unwrap();
        let Some(course) = state.courses.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        if let Some(title) = &changes.course_title {
            course.course_title = title.clone();
        }
        course.sub_title = changes.sub_title.clone().or(course.sub_title.take());
        course.description = changes.description.clone().or(course.description.take());
        course.category = changes.category.clone().or(course.category.take());
        course.course_level = changes.course_level.clone().or(course.course_level.take());
        course.course_price = changes.course_price.or(course.course_price);
        course.course_thumbnail = changes.course_thumbnail.clone().or(course.course_thumbnail.take());

        Ok(Some(course.clone()))
    }

    async fn set_published(&self, id: Uuid, published: bool) -> Result<Option<Course>, AppError> {
        let mut state = self.state.lock().unwrap();
        let course = state.courses.iter_mut().find(|c| c.id == id).map(|c| {
            c.is_published = published;
            c.clone()
        });
        Ok(course)
    }

    async fn delete_course(&self, id: Uuid) -> Result<Option<Course>, AppError> {
        let mut state = self.state.lock().unwrap();
        let Some(index) = state.courses.iter().position(|c| c.id == id) else {
            return Ok(None);
        };

        let course = state.courses.remove(index);
        state.lectures.retain(|l| l.course_id != id);
        for purchase in state.purchases.iter_mut().filter(|p| p.course_id == Some(id)) {
            purchase.course_id = None;
        }
        Ok(Some(course))
    }

    async fn create_lecture(&self, course_id: Uuid, lecture_title: &str) -> Result<Lecture, AppError> {
        let lecture = Lecture {
            id: Uuid::new_v4(),
            course_id,
            lecture_title: lecture_title.to_string(),
            video_url: None,
            public_id: None,
            is_preview_free: false,
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().lectures.push(lecture.clone());
        Ok(lecture)
    }

    async fn course_lectures(&self, course_id: Uuid) -> Result<Vec<Lecture>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.lectures.iter().filter(|l| l.course_id == course_id).cloned().collect())
    }

    async fn find_lecture(&self, id: Uuid) -> Result<Option<Lecture>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.lectures.iter().find(|l| l.id == id).cloned())
    }

    async fn update_lecture(&self, id: Uuid, changes: &LectureChanges) -> Result<Option<Lecture>, AppError> {
        let mut state = self.state.lock().unwrap();
        let Some(lecture) = state.lectures.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };

        if let Some(title) = &changes.lecture_title {
            lecture.lecture_title = title.clone();
        }
        lecture.video_url = changes.video_url.clone().or(lecture.video_url.take());
        lecture.public_id = changes.public_id.clone().or(lecture.public_id.take());
        lecture.is_preview_free = changes.is_preview_free;

        Ok(Some(lecture.clone()))
    }

    async fn delete_lecture(&self, id: Uuid) -> Result<Option<Lecture>, AppError> {
        let mut state = self.state.lock().unwrap();
        let index = state.lectures.iter().position(|l| l.id == id);
        Ok(index.map(|i| state.lectures.remove(i)))
    }
}

#[async_trait]
impl PurchaseStore for Catalog {
    async fn completed_purchases(&self, limit: Option<i64>) -> Result<Vec<PurchaseRecord>, AppError> {
        let state = self.state.lock().unwrap();
        let take = limit.map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(state
            .purchases
            .iter()
            .filter(|p| p.status == "completed")
            .take(take)
            .map(|p| state.record(p))
            .collect())
    }

    async fn create_purchase(&self, purchase: &NewPurchase) -> Result<PurchaseRecord, AppError> {
        let mut state = self.state.lock().unwrap();
        let stored = StoredPurchase {
            id: Uuid::new_v4(),
            course_id: Some(purchase.course_id),
            amount: purchase.amount,
            status: purchase.status.as_str().to_string(),
            created_at: Utc::now(),
        };
        let record = state.record(&stored);
        state.purchases.push(stored);
        Ok(record)
    }
}

pub fn catalog_app() -> (Router, Catalog) {
    let catalog = Catalog::default();
    let app = build_router(AppState::new(
        Arc::new(catalog.clone()),
        Arc::new(catalog.clone()),
        "₹",
    ));
    (app, catalog)
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    // Rejeições do axum (query/JSON malformados) vêm em texto puro
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
}

/// Faz a requisição e devolve status + corpo JSON.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder().method(method).uri(uri).body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_json(response).await)
}
