use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::enrollment::application::domain::entities::LessonProgress;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GetProgressError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait GetProgressUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        course_id: &str,
    ) -> Result<Vec<LessonProgress>, GetProgressError>;
}
