use async_trait::async_trait;

use crate::modules::course::application::domain::entities::Course;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListCoursesError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ListCoursesUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<Course>, ListCoursesError>;
}
