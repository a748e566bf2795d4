use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::enrollment::application::domain::entities::{
    LessonProgress, NewLessonProgress,
};
use crate::modules::enrollment::application::domain::policies::{
    evaluate_content_access, AccessDecision,
};
use crate::modules::enrollment::application::ports::incoming::use_cases::get_progress::{
    GetProgressError, GetProgressUseCase,
};
use crate::modules::enrollment::application::ports::incoming::use_cases::record_lesson_progress::{
    RecordLessonProgressError, RecordLessonProgressUseCase,
};
use crate::shared::clock::Clock;
use crate::shared::storage::Storage;

/// Lesson completion is content access, so it goes through the verified gate
/// and the Access Evaluator. Recording counts as user activity.
pub struct LessonProgressService {
    storage: Storage,
    clock: Arc<dyn Clock>,
}

impl LessonProgressService {
    pub fn new(storage: Storage, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }
}

#[async_trait]
impl RecordLessonProgressUseCase for LessonProgressService {
    async fn execute(
        &self,
        user_id: Uuid,
        course_id: &str,
        lesson_id: &str,
    ) -> Result<LessonProgress, RecordLessonProgressError> {
        let lesson_id = lesson_id.trim();
        let course_id = course_id.trim();
        if lesson_id.is_empty() || course_id.is_empty() {
            return Err(RecordLessonProgressError::InvalidInput(
                "courseId and lessonId are required".to_string(),
            ));
        }

        let store = self.storage.resolve();
        let now = self.clock.now();

        let user = store
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| RecordLessonProgressError::RepositoryError(e.to_string()))?
            .ok_or(RecordLessonProgressError::UserNotFound)?;

        let enrollment = store
            .enrollments
            .find_by_user_and_course(user_id, course_id)
            .await
            .map_err(|e| RecordLessonProgressError::RepositoryError(e.to_string()))?;

        if let AccessDecision::Denied(denial) =
            evaluate_content_access(user.is_verified, enrollment.as_ref(), now)
        {
            tracing::warn!(user_id = %user_id, course_id = %course_id, ?denial, "Lesson progress refused");
            return Err(RecordLessonProgressError::AccessDenied(denial));
        }

        let progress = store
            .lesson_progress
            .record(NewLessonProgress {
                user_id,
                course_id: course_id.to_string(),
                lesson_id: lesson_id.to_string(),
                completed_at: now,
            })
            .await
            .map_err(|e| RecordLessonProgressError::RepositoryError(e.to_string()))?;

        if let Err(e) = store.users.touch_activity(user_id, now).await {
            tracing::warn!(user_id = %user_id, error = %e, "Failed to record activity");
        }

        Ok(progress)
    }
}

#[async_trait]
impl GetProgressUseCase for LessonProgressService {
    async fn execute(
        &self,
        user_id: Uuid,
        course_id: &str,
    ) -> Result<Vec<LessonProgress>, GetProgressError> {
        self.storage
            .resolve()
            .lesson_progress
            .list_for_user_course(user_id, course_id)
            .await
            .map_err(|e| GetProgressError::RepositoryError(e.to_string()))
    }
}
