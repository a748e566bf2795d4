use async_trait::async_trait;

use crate::modules::course::application::domain::entities::Course;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GetCourseError {
    #[error("Course not found")]
    CourseNotFound,
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait GetCourseUseCase: Send + Sync {
    async fn execute(&self, course_id: &str) -> Result<Course, GetCourseError>;
}
