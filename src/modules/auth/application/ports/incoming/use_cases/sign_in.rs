use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::modules::auth::application::domain::entities::UserProfile;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInOutput {
    pub user: UserProfile,
    pub session_token: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SignInError {
    #[error("User not found")]
    UserNotFound,

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Email-only identity: no credential is checked.
#[async_trait]
pub trait SignInUseCase: Send + Sync {
    async fn execute(&self, email: &str) -> Result<SignInOutput, SignInError>;
}
