use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteCourseOutput {
    pub enrollment_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub access_expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompleteCourseError {
    /// Also returned when the enrollment belongs to someone else.
    #[error("Enrollment not found")]
    EnrollmentNotFound,
    #[error("Course already completed")]
    AlreadyCompleted,
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait CompleteCourseUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        enrollment_id: Uuid,
    ) -> Result<CompleteCourseOutput, CompleteCourseError>;
}
