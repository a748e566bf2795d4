use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::enrollment::application::domain::entities::LessonProgress;
use crate::modules::enrollment::application::domain::policies::AccessDenial;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordLessonProgressError {
    #[error("User not found")]
    UserNotFound,
    #[error("Access denied: {0:?}")]
    AccessDenied(AccessDenial),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Marks a lesson done. Repeating the call for the same lesson returns the
/// first record.
#[async_trait]
pub trait RecordLessonProgressUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        course_id: &str,
        lesson_id: &str,
    ) -> Result<LessonProgress, RecordLessonProgressError>;
}
