pub mod course_repository_memory;
pub mod course_repository_postgres;
pub mod sea_orm_entity;

pub use course_repository_memory::CourseRepositoryMemory;
pub use course_repository_postgres::CourseRepositoryPostgres;
