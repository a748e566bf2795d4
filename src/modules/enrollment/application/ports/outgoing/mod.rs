pub mod enrollment_repository;
pub mod lesson_progress_repository;

pub use enrollment_repository::{EnrollmentRepository, EnrollmentRepositoryError};
pub use lesson_progress_repository::{LessonProgressRepository, LessonProgressRepositoryError};
