pub mod enrollments;
pub mod lesson_progress;
