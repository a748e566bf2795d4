use async_trait::async_trait;

use crate::modules::grading::application::domain::entities::Submission;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListSubmissionsError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ListSubmissionsUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<Submission>, ListSubmissionsError>;
}
