use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::enrollment::application::domain::entities::Enrollment;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollOutput {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    /// True while a paid course still has no confirmed payment.
    pub requires_payment: bool,
    /// Price in minor units, present for paid courses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EnrollError {
    #[error("Course not found")]
    CourseNotFound,
    #[error("User not found")]
    UserNotFound,
    #[error("Email verification is required to enroll in free courses")]
    VerificationRequired,
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Enrolling twice in the same course returns the existing enrollment.
#[async_trait]
pub trait EnrollUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid, course_id: &str) -> Result<EnrollOutput, EnrollError>;
}
