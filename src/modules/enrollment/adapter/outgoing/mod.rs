pub mod enrollment_repository_memory;
pub mod enrollment_repository_postgres;
pub mod lesson_progress_repository_memory;
pub mod lesson_progress_repository_postgres;
pub mod sea_orm_entity;

pub use enrollment_repository_memory::EnrollmentRepositoryMemory;
pub use enrollment_repository_postgres::EnrollmentRepositoryPostgres;
pub use lesson_progress_repository_memory::LessonProgressRepositoryMemory;
pub use lesson_progress_repository_postgres::LessonProgressRepositoryPostgres;
