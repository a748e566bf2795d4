use std::sync::Arc;

use crate::modules::course::application::ports::incoming::use_cases::{
    GetCourseUseCase, ListCoursesUseCase,
};

#[derive(Clone)]
pub struct CourseUseCases {
    pub list: Arc<dyn ListCoursesUseCase + Send + Sync>,
    pub get: Arc<dyn GetCourseUseCase + Send + Sync>,
}
