use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

pub const MIN_GRADE: i32 = 0;
pub const MAX_GRADE: i32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: String,
    pub project_title: String,
    pub description: String,
    pub project_url: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub grade: Option<i32>,
    pub feedback: Option<String>,
    pub graded_at: Option<DateTime<Utc>>,
    pub graded_by: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub user_id: Uuid,
    pub course_id: String,
    pub project_title: String,
    pub description: String,
    pub project_url: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct GradeEntry {
    pub grade: i32,
    pub feedback: Option<String>,
    pub graded_by: Uuid,
    pub graded_at: DateTime<Utc>,
}
