use async_trait::async_trait;

use crate::modules::course::application::domain::entities::Course;
use crate::modules::course::application::ports::incoming::use_cases::{
    GetCourseError, GetCourseUseCase, ListCoursesError, ListCoursesUseCase,
};
use crate::shared::storage::Storage;

/// Read side of the Catalog Store.
#[derive(Clone)]
pub struct CatalogService {
    storage: Storage,
}

impl CatalogService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ListCoursesUseCase for CatalogService {
    async fn execute(&self) -> Result<Vec<Course>, ListCoursesError> {
        self.storage
            .resolve()
            .courses
            .list_courses()
            .await
            .map_err(|e| ListCoursesError::RepositoryError(e.to_string()))
    }
}

#[async_trait]
impl GetCourseUseCase for CatalogService {
    async fn execute(&self, course_id: &str) -> Result<Course, GetCourseError> {
        self.storage
            .resolve()
            .courses
            .find_by_id(course_id)
            .await
            .map_err(|e| GetCourseError::RepositoryError(e.to_string()))?
            .ok_or(GetCourseError::CourseNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fallback_catalog_is_seeded() {
        let service = CatalogService::new(Storage::memory_only());

        let courses = ListCoursesUseCase::execute(&service).await.unwrap();
        assert_eq!(courses.len(), 3);
        assert!(courses.iter().any(|c| c.is_free()));

        let course = GetCourseUseCase::execute(&service, "ai-agents").await.unwrap();
        assert_eq!(course.price, 19900);
    }

    #[tokio::test]
    async fn unknown_course_is_not_found() {
        let service = CatalogService::new(Storage::memory_only());

        let err = GetCourseUseCase::execute(&service, "nope").await.unwrap_err();
        assert_eq!(err, GetCourseError::CourseNotFound);
    }
}
