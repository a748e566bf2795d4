use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::enrollment::application::domain::entities::{
    Enrollment, NewEnrollment, PaymentRecord,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EnrollmentRepositoryError {
    #[error("Enrollment already exists for this user and course")]
    AlreadyEnrolled,

    #[error("Enrollment not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Enrollment Ledger. No version field: concurrent writers to the same
/// enrollment are last-write-wins on the fields each one touches.
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    async fn create_enrollment(
        &self,
        enrollment: NewEnrollment,
    ) -> Result<Enrollment, EnrollmentRepositoryError>;

    async fn find_by_id(
        &self,
        enrollment_id: Uuid,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError>;

    async fn find_by_user_and_course(
        &self,
        user_id: Uuid,
        course_id: &str,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError>;

    async fn list_by_user(&self, user_id: Uuid)
        -> Result<Vec<Enrollment>, EnrollmentRepositoryError>;

    async fn grant_access(&self, enrollment_id: Uuid) -> Result<(), EnrollmentRepositoryError>;

    /// Grants access on every enrollment of the user; returns how many rows changed.
    async fn grant_access_for_user(&self, user_id: Uuid) -> Result<u64, EnrollmentRepositoryError>;

    /// Sets `has_access`, `payment_id` and `paid_amount` unless a payment is
    /// already on file, in which case nothing is written.
    async fn record_payment(
        &self,
        enrollment_id: Uuid,
        payment_id: String,
        paid_amount: i64,
    ) -> Result<PaymentRecord, EnrollmentRepositoryError>;

    async fn mark_completed(
        &self,
        enrollment_id: Uuid,
        completed_at: DateTime<Utc>,
        access_expires_at: DateTime<Utc>,
    ) -> Result<Enrollment, EnrollmentRepositoryError>;
}
