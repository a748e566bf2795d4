use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessCheckOutput {
    pub has_access: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Email not verified")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckAccessError {
    #[error("User not found")]
    UserNotFound,
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait CheckAccessUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        course_id: &str,
    ) -> Result<AccessCheckOutput, CheckAccessError>;
}
