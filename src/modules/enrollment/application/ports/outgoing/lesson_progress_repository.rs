use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::enrollment::application::domain::entities::{
    LessonProgress, NewLessonProgress,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LessonProgressRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait LessonProgressRepository: Send + Sync {
    /// Records a completed lesson; an existing record for the same
    /// user, course and lesson is returned unchanged.
    async fn record(
        &self,
        progress: NewLessonProgress,
    ) -> Result<LessonProgress, LessonProgressRepositoryError>;

    async fn list_for_user_course(
        &self,
        user_id: Uuid,
        course_id: &str,
    ) -> Result<Vec<LessonProgress>, LessonProgressRepositoryError>;
}
