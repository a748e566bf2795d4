use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::grading::application::domain::entities::{
    GradeEntry, NewSubmission, Submission,
};
use crate::modules::grading::application::ports::outgoing::submission_repository::{
    SubmissionRepository, SubmissionRepositoryError,
};

use super::sea_orm_entity::submissions::{
    ActiveModel as SubmissionActiveModel, Column as SubmissionColumn,
    Entity as SubmissionEntity, Model as SubmissionModel,
};

#[derive(Clone, Debug)]
pub struct SubmissionRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl SubmissionRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn to_domain(model: SubmissionModel) -> Submission {
        Submission {
            id: model.id,
            user_id: model.user_id,
            course_id: model.course_id,
            project_title: model.project_title,
            description: model.description,
            project_url: model.project_url,
            submitted_at: model.submitted_at.with_timezone(&Utc),
            grade: model.grade,
            feedback: model.feedback,
            graded_at: model.graded_at.map(|t| t.with_timezone(&Utc)),
            graded_by: model.graded_by,
        }
    }

    fn db_err(e: DbErr) -> SubmissionRepositoryError {
        SubmissionRepositoryError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl SubmissionRepository for SubmissionRepositoryPostgres {
    async fn create_submission(
        &self,
        submission: NewSubmission,
    ) -> Result<Submission, SubmissionRepositoryError> {
        let active = SubmissionActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(submission.user_id),
            course_id: Set(submission.course_id),
            project_title: Set(submission.project_title),
            description: Set(submission.description),
            project_url: Set(submission.project_url),
            submitted_at: Set(submission.submitted_at.fixed_offset()),
            grade: Set(None),
            feedback: Set(None),
            graded_at: Set(None),
            graded_by: Set(None),
        };

        let inserted = active.insert(&*self.db).await.map_err(Self::db_err)?;
        Ok(Self::to_domain(inserted))
    }

    async fn find_by_id(
        &self,
        submission_id: Uuid,
    ) -> Result<Option<Submission>, SubmissionRepositoryError> {
        let model = SubmissionEntity::find_by_id(submission_id)
            .one(&*self.db)
            .await
            .map_err(Self::db_err)?;
        Ok(model.map(Self::to_domain))
    }

    async fn list_all(&self) -> Result<Vec<Submission>, SubmissionRepositoryError> {
        let models = SubmissionEntity::find()
            .order_by_desc(SubmissionColumn::SubmittedAt)
            .all(&*self.db)
            .await
            .map_err(Self::db_err)?;
        Ok(models.into_iter().map(Self::to_domain).collect())
    }

    async fn grade(
        &self,
        submission_id: Uuid,
        entry: GradeEntry,
    ) -> Result<Option<Submission>, SubmissionRepositoryError> {
        let Some(model) = SubmissionEntity::find_by_id(submission_id)
            .one(&*self.db)
            .await
            .map_err(Self::db_err)?
        else {
            return Ok(None);
        };

        let mut active: SubmissionActiveModel = model.into();
        active.grade = Set(Some(entry.grade));
        active.feedback = Set(entry.feedback);
        active.graded_at = Set(Some(entry.graded_at.fixed_offset()));
        active.graded_by = Set(Some(entry.graded_by));

        let updated = active.update(&*self.db).await.map_err(Self::db_err)?;
        Ok(Some(Self::to_domain(updated)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn model() -> SubmissionModel {
        SubmissionModel {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            course_id: "ai-agents".to_string(),
            project_title: "Agent".to_string(),
            description: "An agent".to_string(),
            project_url: None,
            submitted_at: Utc::now().fixed_offset(),
            grade: None,
            feedback: None,
            graded_at: None,
            graded_by: None,
        }
    }

    #[tokio::test]
    async fn grade_missing_submission_returns_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<SubmissionModel>::new()])
            .into_connection();
        let repo = SubmissionRepositoryPostgres::new(Arc::new(db));

        let result = repo
            .grade(
                Uuid::new_v4(),
                GradeEntry {
                    grade: 90,
                    feedback: None,
                    graded_by: Uuid::new_v4(),
                    graded_at: Utc::now(),
                },
            )
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn grade_writes_all_grading_fields() {
        let original = model();
        let grader = Uuid::new_v4();
        let mut graded = original.clone();
        graded.grade = Some(88);
        graded.feedback = Some("Solid".to_string());
        graded.graded_at = Some(Utc::now().fixed_offset());
        graded.graded_by = Some(grader);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![original.clone()]])
            .append_query_results(vec![vec![graded]])
            .into_connection();
        let repo = SubmissionRepositoryPostgres::new(Arc::new(db));

        let result = repo
            .grade(
                original.id,
                GradeEntry {
                    grade: 88,
                    feedback: Some("Solid".to_string()),
                    graded_by: grader,
                    graded_at: Utc::now(),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.grade, Some(88));
        assert_eq!(result.graded_by, Some(grader));
    }
}
