use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::enrollment::application::domain::entities::Enrollment;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListMyEnrollmentsError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ListMyEnrollmentsUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid) -> Result<Vec<Enrollment>, ListMyEnrollmentsError>;
}
