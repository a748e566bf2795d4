pub mod sea_orm_entity;
pub mod submission_repository_memory;
pub mod submission_repository_postgres;

pub use submission_repository_memory::SubmissionRepositoryMemory;
pub use submission_repository_postgres::SubmissionRepositoryPostgres;
