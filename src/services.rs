pub mod course_service;
pub use course_service::CourseService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod purchase_service;
pub use purchase_service::PurchaseService;
