pub mod check_access_service;
pub mod complete_course_service;
pub mod enroll_service;
pub mod lesson_progress_service;
pub mod list_my_enrollments_service;

pub use check_access_service::CheckAccessService;
pub use complete_course_service::CompleteCourseService;
pub use enroll_service::EnrollService;
pub use lesson_progress_service::LessonProgressService;
pub use list_my_enrollments_service::ListMyEnrollmentsService;
