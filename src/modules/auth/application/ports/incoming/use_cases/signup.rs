use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::modules::auth::application::domain::entities::UserProfile;

pub const MSG_CHECK_EMAIL: &str =
    "Account created. Please check your email to verify your account.";
pub const MSG_EMAIL_UNAVAILABLE: &str =
    "Account created. Email delivery is unavailable; your account will be verified manually.";
pub const MSG_ADMIN_CREATED: &str = "Admin account created and verified.";

#[derive(Debug, Clone)]
pub struct SignupInput {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupOutput {
    pub user: UserProfile,
    pub session_token: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SignupError {
    #[error("An account with this email already exists")]
    UserAlreadyExists,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait SignupUseCase: Send + Sync {
    async fn execute(&self, input: SignupInput) -> Result<SignupOutput, SignupError>;
}
