use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// How long a learner keeps access after completing a course.
pub const ACCESS_DAYS_AFTER_COMPLETION: i64 = 10;

pub fn access_expiry_after_completion(completed_at: DateTime<Utc>) -> DateTime<Utc> {
    completed_at + Duration::days(ACCESS_DAYS_AFTER_COMPLETION)
}

/// Link between a user and a course. Being enrolled is not the same as
/// having access; see `policies::access_policy`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: String,
    pub has_access: bool,
    pub enrolled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub access_expires_at: Option<DateTime<Utc>>,
    pub payment_id: Option<String>,
    pub paid_amount: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewEnrollment {
    pub user_id: Uuid,
    pub course_id: String,
    pub has_access: bool,
    pub enrolled_at: DateTime<Utc>,
}

/// Outcome of recording a confirmed payment against an enrollment.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentRecord {
    Recorded(Enrollment),
    /// A payment was already on file; nothing was written.
    AlreadyRecorded(Enrollment),
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonProgress {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: String,
    pub lesson_id: String,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewLessonProgress {
    pub user_id: Uuid,
    pub course_id: String,
    pub lesson_id: String,
    pub completed_at: DateTime<Utc>,
}
