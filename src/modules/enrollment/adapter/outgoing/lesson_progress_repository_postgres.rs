use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::enrollment::application::domain::entities::{
    LessonProgress, NewLessonProgress,
};
use crate::modules::enrollment::application::ports::outgoing::lesson_progress_repository::{
    LessonProgressRepository, LessonProgressRepositoryError,
};

use super::sea_orm_entity::lesson_progress::{
    ActiveModel as ProgressActiveModel, Column as ProgressColumn, Entity as ProgressEntity,
    Model as ProgressModel,
};

#[derive(Clone, Debug)]
pub struct LessonProgressRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl LessonProgressRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn to_domain(model: ProgressModel) -> LessonProgress {
        LessonProgress {
            id: model.id,
            user_id: model.user_id,
            course_id: model.course_id,
            lesson_id: model.lesson_id,
            completed_at: model.completed_at.with_timezone(&Utc),
        }
    }

    fn db_err(e: DbErr) -> LessonProgressRepositoryError {
        LessonProgressRepositoryError::DatabaseError(e.to_string())
    }

    async fn find_existing(
        &self,
        user_id: Uuid,
        course_id: &str,
        lesson_id: &str,
    ) -> Result<Option<ProgressModel>, LessonProgressRepositoryError> {
        ProgressEntity::find()
            .filter(ProgressColumn::UserId.eq(user_id))
            .filter(ProgressColumn::CourseId.eq(course_id))
            .filter(ProgressColumn::LessonId.eq(lesson_id))
            .one(&*self.db)
            .await
            .map_err(Self::db_err)
    }
}

#[async_trait]
impl LessonProgressRepository for LessonProgressRepositoryPostgres {
    async fn record(
        &self,
        progress: NewLessonProgress,
    ) -> Result<LessonProgress, LessonProgressRepositoryError> {
        if let Some(existing) = self
            .find_existing(progress.user_id, &progress.course_id, &progress.lesson_id)
            .await?
        {
            return Ok(Self::to_domain(existing));
        }

        let active = ProgressActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(progress.user_id),
            course_id: Set(progress.course_id.clone()),
            lesson_id: Set(progress.lesson_id.clone()),
            completed_at: Set(progress.completed_at.fixed_offset()),
        };

        match active.insert(&*self.db).await {
            Ok(inserted) => Ok(Self::to_domain(inserted)),
            Err(e) if e.to_string().to_lowercase().contains("duplicate key") => {
                // Lost a race with a concurrent insert of the same lesson.
                self.find_existing(progress.user_id, &progress.course_id, &progress.lesson_id)
                    .await?
                    .map(Self::to_domain)
                    .ok_or_else(|| Self::db_err(e))
            }
            Err(e) => Err(Self::db_err(e)),
        }
    }

    async fn list_for_user_course(
        &self,
        user_id: Uuid,
        course_id: &str,
    ) -> Result<Vec<LessonProgress>, LessonProgressRepositoryError> {
        let models = ProgressEntity::find()
            .filter(ProgressColumn::UserId.eq(user_id))
            .filter(ProgressColumn::CourseId.eq(course_id))
            .order_by_asc(ProgressColumn::CompletedAt)
            .all(&*self.db)
            .await
            .map_err(Self::db_err)?;
        Ok(models.into_iter().map(Self::to_domain).collect())
    }
}
