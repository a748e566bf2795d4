use async_trait::async_trait;

use crate::modules::course::application::domain::entities::Course;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CourseRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Catalog Store. Read-only from the lifecycle's point of view.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn list_courses(&self) -> Result<Vec<Course>, CourseRepositoryError>;
    async fn find_by_id(&self, course_id: &str) -> Result<Option<Course>, CourseRepositoryError>;
}
