use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::UserProfile;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchProfileError {
    #[error("User not found")]
    UserNotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait FetchProfileUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid) -> Result<UserProfile, FetchProfileError>;
}
