use async_trait::async_trait;

use crate::modules::auth::application::domain::entities::UserProfile;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VerifyEmailError {
    /// Unknown, already used and expired tokens all land here.
    #[error("Invalid or expired verification token")]
    InvalidOrExpiredToken,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait VerifyEmailUseCase: Send + Sync {
    async fn execute(&self, token: &str) -> Result<UserProfile, VerifyEmailError>;
}
