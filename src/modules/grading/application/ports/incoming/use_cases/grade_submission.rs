use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::grading::application::domain::entities::Submission;

#[derive(Debug, Clone)]
pub struct GradeSubmissionInput {
    pub submission_id: Uuid,
    pub grade: i32,
    pub feedback: Option<String>,
    pub grader_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GradeSubmissionError {
    #[error("Grade {0} is outside 0-100")]
    InvalidGrade(i32),
    #[error("Submission not found")]
    SubmissionNotFound,
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Records a grade. Does not complete the course; completion is a separate
/// call.
#[async_trait]
pub trait GradeSubmissionUseCase: Send + Sync {
    async fn execute(&self, input: GradeSubmissionInput)
        -> Result<Submission, GradeSubmissionError>;
}
