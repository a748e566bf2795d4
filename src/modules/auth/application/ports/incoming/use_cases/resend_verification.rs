use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResendVerificationOutput {
    pub message: String,
    pub email_sent: bool,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResendVerificationError {
    #[error("User not found")]
    UserNotFound,

    #[error("Email is already verified")]
    AlreadyVerified,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ResendVerificationUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid)
        -> Result<ResendVerificationOutput, ResendVerificationError>;
}
