use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use crate::modules::course::application::domain::entities::Course;
use crate::modules::course::application::ports::outgoing::course_repository::{
    CourseRepository, CourseRepositoryError,
};

#[derive(Clone, Debug, Default)]
pub struct CourseRepositoryMemory {
    courses: Arc<DashMap<String, Course>>,
}

impl CourseRepositoryMemory {
    pub fn with_catalog(catalog: Vec<Course>) -> Self {
        let courses = DashMap::new();
        for course in catalog {
            courses.insert(course.id.clone(), course);
        }
        Self {
            courses: Arc::new(courses),
        }
    }
}

#[async_trait]
impl CourseRepository for CourseRepositoryMemory {
    async fn list_courses(&self) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut courses: Vec<Course> = self.courses.iter().map(|c| c.value().clone()).collect();
        courses.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(courses)
    }

    async fn find_by_id(&self, course_id: &str) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(self.courses.get(course_id).map(|c| c.value().clone()))
    }
}
