use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyInactiveUsersOutput {
    pub verified_count: u64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VerifyInactiveUsersError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Force-verifies unverified users idle past the cutoff and unlocks their
/// enrollments.
#[async_trait]
pub trait VerifyInactiveUsersUseCase: Send + Sync {
    async fn execute(&self) -> Result<VerifyInactiveUsersOutput, VerifyInactiveUsersError>;
}
