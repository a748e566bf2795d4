use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::enrollment::application::domain::policies::AccessDenial;
use crate::modules::grading::application::domain::entities::Submission;

#[derive(Debug, Clone)]
pub struct CreateSubmissionInput {
    pub project_title: String,
    pub description: String,
    pub project_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CreateSubmissionError {
    #[error("User not found")]
    UserNotFound,
    #[error("Access denied: {0:?}")]
    AccessDenied(AccessDenial),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Project hand-in. Requires current access to the course.
#[async_trait]
pub trait CreateSubmissionUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        course_id: &str,
        input: CreateSubmissionInput,
    ) -> Result<Submission, CreateSubmissionError>;
}
