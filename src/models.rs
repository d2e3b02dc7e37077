pub mod course;
pub mod dashboard;
pub mod purchase;
