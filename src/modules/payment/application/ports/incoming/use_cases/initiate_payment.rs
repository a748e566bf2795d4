use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InitiatePaymentOutput {
    /// Opaque hosted checkout ticket.
    pub ticket: String,
    #[schema(example = "ord-0b6c1f0e2f7c4a439d552b1f7f3c9a10-1767225600123")]
    pub order_id: String,
    #[schema(example = "199.00")]
    pub amount: String,
    pub course_title: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InitiatePaymentError {
    #[error("Course not found")]
    CourseNotFound,
    #[error("User not found")]
    UserNotFound,
    #[error("Course is free")]
    CourseIsFree,
    #[error("User already has access to this course")]
    AlreadyHasAccess,
    #[error("Payment initialization failed: {0}")]
    PaymentInitFailed(String),
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Opens a hosted checkout for a paid course. Gateway failures are not retried.
#[async_trait]
pub trait InitiatePaymentUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        course_id: &str,
    ) -> Result<InitiatePaymentOutput, InitiatePaymentError>;
}
