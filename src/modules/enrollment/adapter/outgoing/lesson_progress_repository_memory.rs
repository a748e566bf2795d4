use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::enrollment::application::domain::entities::{
    LessonProgress, NewLessonProgress,
};
use crate::modules::enrollment::application::ports::outgoing::lesson_progress_repository::{
    LessonProgressRepository, LessonProgressRepositoryError,
};

type ProgressKey = (Uuid, String, String);

#[derive(Clone, Debug, Default)]
pub struct LessonProgressRepositoryMemory {
    progress: Arc<DashMap<ProgressKey, LessonProgress>>,
}

impl LessonProgressRepositoryMemory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LessonProgressRepository for LessonProgressRepositoryMemory {
    async fn record(
        &self,
        progress: NewLessonProgress,
    ) -> Result<LessonProgress, LessonProgressRepositoryError> {
        let key = (
            progress.user_id,
            progress.course_id.clone(),
            progress.lesson_id.clone(),
        );
        let entry = self.progress.entry(key).or_insert_with(|| LessonProgress {
            id: Uuid::new_v4(),
            user_id: progress.user_id,
            course_id: progress.course_id,
            lesson_id: progress.lesson_id,
            completed_at: progress.completed_at,
        });
        Ok(entry.value().clone())
    }

    async fn list_for_user_course(
        &self,
        user_id: Uuid,
        course_id: &str,
    ) -> Result<Vec<LessonProgress>, LessonProgressRepositoryError> {
        let mut found: Vec<LessonProgress> = self
            .progress
            .iter()
            .filter(|p| p.user_id == user_id && p.course_id == course_id)
            .map(|p| p.value().clone())
            .collect();
        found.sort_by(|a, b| a.completed_at.cmp(&b.completed_at));
        Ok(found)
    }
}
