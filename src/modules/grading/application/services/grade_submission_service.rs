use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::grading::application::domain::entities::{
    GradeEntry, Submission, MAX_GRADE, MIN_GRADE,
};
use crate::modules::grading::application::ports::incoming::use_cases::grade_submission::{
    GradeSubmissionError, GradeSubmissionInput, GradeSubmissionUseCase,
};
use crate::shared::clock::Clock;
use crate::shared::storage::Storage;

pub struct GradeSubmissionService {
    storage: Storage,
    clock: Arc<dyn Clock>,
}

impl GradeSubmissionService {
    pub fn new(storage: Storage, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }
}

#[async_trait]
impl GradeSubmissionUseCase for GradeSubmissionService {
    async fn execute(
        &self,
        input: GradeSubmissionInput,
    ) -> Result<Submission, GradeSubmissionError> {
        if !(MIN_GRADE..=MAX_GRADE).contains(&input.grade) {
            return Err(GradeSubmissionError::InvalidGrade(input.grade));
        }

        let feedback = input
            .feedback
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty());

        let graded = self
            .storage
            .resolve()
            .submissions
            .grade(
                input.submission_id,
                GradeEntry {
                    grade: input.grade,
                    feedback,
                    graded_by: input.grader_id,
                    graded_at: self.clock.now(),
                },
            )
            .await
            .map_err(|e| GradeSubmissionError::RepositoryError(e.to_string()))?
            .ok_or(GradeSubmissionError::SubmissionNotFound)?;

        tracing::info!(
            submission_id = %graded.id,
            grader_id = %input.grader_id,
            grade = input.grade,
            "Submission graded"
        );
        Ok(graded)
    }
}
