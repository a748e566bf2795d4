use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::enrollment::application::domain::entities::access_expiry_after_completion;
use crate::modules::enrollment::application::domain::policies::CompletionPolicy;
use crate::modules::enrollment::application::ports::incoming::use_cases::complete_course::{
    CompleteCourseError, CompleteCourseOutput, CompleteCourseUseCase,
};
use crate::modules::enrollment::application::ports::outgoing::EnrollmentRepositoryError;
use crate::shared::clock::Clock;
use crate::shared::storage::Storage;

/// Starts the post-completion access window. What a repeat completion does
/// is decided by the configured [`CompletionPolicy`].
pub struct CompleteCourseService {
    storage: Storage,
    clock: Arc<dyn Clock>,
    policy: CompletionPolicy,
}

impl CompleteCourseService {
    pub fn new(storage: Storage, clock: Arc<dyn Clock>, policy: CompletionPolicy) -> Self {
        Self {
            storage,
            clock,
            policy,
        }
    }
}

#[async_trait]
impl CompleteCourseUseCase for CompleteCourseService {
    async fn execute(
        &self,
        user_id: Uuid,
        enrollment_id: Uuid,
    ) -> Result<CompleteCourseOutput, CompleteCourseError> {
        let store = self.storage.resolve();

        let enrollment = store
            .enrollments
            .find_by_id(enrollment_id)
            .await
            .map_err(|e| CompleteCourseError::RepositoryError(e.to_string()))?
            .filter(|e| e.user_id == user_id)
            .ok_or(CompleteCourseError::EnrollmentNotFound)?;

        if enrollment.completed_at.is_some() && self.policy == CompletionPolicy::Reject {
            return Err(CompleteCourseError::AlreadyCompleted);
        }

        let completed_at = self.clock.now();
        let access_expires_at = access_expiry_after_completion(completed_at);

        let updated = store
            .enrollments
            .mark_completed(enrollment.id, completed_at, access_expires_at)
            .await
            .map_err(|e| match e {
                EnrollmentRepositoryError::NotFound => CompleteCourseError::EnrollmentNotFound,
                other => CompleteCourseError::RepositoryError(other.to_string()),
            })?;

        tracing::info!(
            user_id = %user_id,
            enrollment_id = %updated.id,
            course_id = %updated.course_id,
            access_expires_at = %access_expires_at,
            "Course completed"
        );

        Ok(CompleteCourseOutput {
            enrollment_id: updated.id,
            completed_at,
            access_expires_at,
        })
    }
}
