pub mod course_repo;
pub use course_repo::{CourseRepository, CourseStore};
pub mod purchase_repo;
pub use purchase_repo::{PurchaseRepository, PurchaseStore};
