use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::enrollment::application::domain::policies::{
    evaluate_content_access, AccessDecision,
};
use crate::modules::grading::application::domain::entities::{NewSubmission, Submission};
use crate::modules::grading::application::ports::incoming::use_cases::create_submission::{
    CreateSubmissionError, CreateSubmissionInput, CreateSubmissionUseCase,
};
use crate::modules::grading::application::ports::incoming::use_cases::list_submissions::{
    ListSubmissionsError, ListSubmissionsUseCase,
};
use crate::shared::clock::Clock;
use crate::shared::storage::Storage;

pub struct SubmissionService {
    storage: Storage,
    clock: Arc<dyn Clock>,
}

impl SubmissionService {
    pub fn new(storage: Storage, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }
}

fn validate(input: CreateSubmissionInput) -> Result<CreateSubmissionInput, CreateSubmissionError> {
    let project_title = input.project_title.trim().to_string();
    let description = input.description.trim().to_string();
    if project_title.is_empty() {
        return Err(CreateSubmissionError::InvalidInput(
            "projectTitle is required".to_string(),
        ));
    }
    if description.is_empty() {
        return Err(CreateSubmissionError::InvalidInput(
            "description is required".to_string(),
        ));
    }
    let project_url = input
        .project_url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());

    Ok(CreateSubmissionInput {
        project_title,
        description,
        project_url,
    })
}

#[async_trait]
impl CreateSubmissionUseCase for SubmissionService {
    async fn execute(
        &self,
        user_id: Uuid,
        course_id: &str,
        input: CreateSubmissionInput,
    ) -> Result<Submission, CreateSubmissionError> {
        let input = validate(input)?;
        let store = self.storage.resolve();
        let now = self.clock.now();

        let user = store
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| CreateSubmissionError::RepositoryError(e.to_string()))?
            .ok_or(CreateSubmissionError::UserNotFound)?;

        let enrollment = store
            .enrollments
            .find_by_user_and_course(user_id, course_id)
            .await
            .map_err(|e| CreateSubmissionError::RepositoryError(e.to_string()))?;

        if let AccessDecision::Denied(denial) =
            evaluate_content_access(user.is_verified, enrollment.as_ref(), now)
        {
            return Err(CreateSubmissionError::AccessDenied(denial));
        }

        let submission = store
            .submissions
            .create_submission(NewSubmission {
                user_id,
                course_id: course_id.to_string(),
                project_title: input.project_title,
                description: input.description,
                project_url: input.project_url,
                submitted_at: now,
            })
            .await
            .map_err(|e| CreateSubmissionError::RepositoryError(e.to_string()))?;

        tracing::info!(user_id = %user_id, course_id = %course_id, submission_id = %submission.id, "Project submitted");
        Ok(submission)
    }
}

#[async_trait]
impl ListSubmissionsUseCase for SubmissionService {
    async fn execute(&self) -> Result<Vec<Submission>, ListSubmissionsError> {
        self.storage
            .resolve()
            .submissions
            .list_all()
            .await
            .map_err(|e| ListSubmissionsError::RepositoryError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::enrollment::application::domain::entities::NewEnrollment;
    use crate::modules::enrollment::application::domain::policies::AccessDenial;
    use crate::tests::support::clock::FixedClock;
    use crate::tests::support::fixtures::insert_user;

    fn input() -> CreateSubmissionInput {
        CreateSubmissionInput {
            project_title: "Agent".to_string(),
            description: "A coding agent".to_string(),
            project_url: Some("  ".to_string()),
        }
    }

    #[tokio::test]
    async fn submission_requires_access() {
        let storage = Storage::memory_only();
        let user = insert_user(&storage, "a@x.com", true).await;
        let svc = SubmissionService::new(storage, Arc::new(FixedClock::default()));

        let err = CreateSubmissionUseCase::execute(&svc, user.id, "ai-agents", input())
            .await
            .unwrap_err();

        assert_eq!(err, CreateSubmissionError::AccessDenied(AccessDenial::NotEnrolled));
    }

    #[tokio::test]
    async fn submissions_are_listed_newest_first() {
        let storage = Storage::memory_only();
        let clock = Arc::new(FixedClock::default());
        let user = insert_user(&storage, "a@x.com", true).await;
        storage
            .resolve()
            .enrollments
            .create_enrollment(NewEnrollment {
                user_id: user.id,
                course_id: "ai-agents".to_string(),
                has_access: true,
                enrolled_at: clock.now(),
            })
            .await
            .unwrap();
        let svc = SubmissionService::new(storage, clock.clone());

        let first = CreateSubmissionUseCase::execute(&svc, user.id, "ai-agents", input())
            .await
            .unwrap();
        clock.advance(chrono::Duration::minutes(1));
        let second = CreateSubmissionUseCase::execute(&svc, user.id, "ai-agents", input())
            .await
            .unwrap();

        assert_eq!(first.project_url, None);
        let listed = ListSubmissionsUseCase::execute(&svc).await.unwrap();
        assert_eq!(
            listed.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![second.id, first.id]
        );
    }

    #[tokio::test]
    async fn blank_title_is_invalid() {
        let storage = Storage::memory_only();
        let svc = SubmissionService::new(storage, Arc::new(FixedClock::default()));
        let mut bad = input();
        bad.project_title = " ".to_string();

        let err = CreateSubmissionUseCase::execute(&svc, uuid::Uuid::new_v4(), "ai-agents", bad)
            .await
            .unwrap_err();

        assert!(matches!(err, CreateSubmissionError::InvalidInput(_)));
    }
}
