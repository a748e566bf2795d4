use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::grading::application::domain::entities::{
    GradeEntry, NewSubmission, Submission,
};
use crate::modules::grading::application::ports::outgoing::submission_repository::{
    SubmissionRepository, SubmissionRepositoryError,
};

#[derive(Clone, Debug, Default)]
pub struct SubmissionRepositoryMemory {
    submissions: Arc<DashMap<Uuid, Submission>>,
}

impl SubmissionRepositoryMemory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionRepository for SubmissionRepositoryMemory {
    async fn create_submission(
        &self,
        submission: NewSubmission,
    ) -> Result<Submission, SubmissionRepositoryError> {
        let created = Submission {
            id: Uuid::new_v4(),
            user_id: submission.user_id,
            course_id: submission.course_id,
            project_title: submission.project_title,
            description: submission.description,
            project_url: submission.project_url,
            submitted_at: submission.submitted_at,
            grade: None,
            feedback: None,
            graded_at: None,
            graded_by: None,
        };
        self.submissions.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(
        &self,
        submission_id: Uuid,
    ) -> Result<Option<Submission>, SubmissionRepositoryError> {
        Ok(self.submissions.get(&submission_id).map(|s| s.value().clone()))
    }

    async fn list_all(&self) -> Result<Vec<Submission>, SubmissionRepositoryError> {
        let mut all: Vec<Submission> = self.submissions.iter().map(|s| s.value().clone()).collect();
        all.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(all)
    }

    async fn grade(
        &self,
        submission_id: Uuid,
        entry: GradeEntry,
    ) -> Result<Option<Submission>, SubmissionRepositoryError> {
        let Some(mut submission) = self.submissions.get_mut(&submission_id) else {
            return Ok(None);
        };
        submission.grade = Some(entry.grade);
        submission.feedback = entry.feedback;
        submission.graded_at = Some(entry.graded_at);
        submission.graded_by = Some(entry.graded_by);
        Ok(Some(submission.value().clone()))
    }
}
