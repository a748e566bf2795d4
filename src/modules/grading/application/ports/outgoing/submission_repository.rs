use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::grading::application::domain::entities::{
    GradeEntry, NewSubmission, Submission,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmissionRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn create_submission(
        &self,
        submission: NewSubmission,
    ) -> Result<Submission, SubmissionRepositoryError>;

    async fn find_by_id(
        &self,
        submission_id: Uuid,
    ) -> Result<Option<Submission>, SubmissionRepositoryError>;

    /// Newest first.
    async fn list_all(&self) -> Result<Vec<Submission>, SubmissionRepositoryError>;

    /// Returns `None` when the submission does not exist.
    async fn grade(
        &self,
        submission_id: Uuid,
        entry: GradeEntry,
    ) -> Result<Option<Submission>, SubmissionRepositoryError>;
}
