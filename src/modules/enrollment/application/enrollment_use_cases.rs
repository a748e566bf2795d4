use std::sync::Arc;

use crate::modules::enrollment::application::ports::incoming::use_cases::{
    CheckAccessUseCase, CompleteCourseUseCase, EnrollUseCase, GetProgressUseCase,
    ListMyEnrollmentsUseCase, RecordLessonProgressUseCase,
};

#[derive(Clone)]
pub struct EnrollmentUseCases {
    pub enroll: Arc<dyn EnrollUseCase + Send + Sync>,
    pub check_access: Arc<dyn CheckAccessUseCase + Send + Sync>,
    pub complete_course: Arc<dyn CompleteCourseUseCase + Send + Sync>,
    pub list_mine: Arc<dyn ListMyEnrollmentsUseCase + Send + Sync>,
    pub record_lesson: Arc<dyn RecordLessonProgressUseCase + Send + Sync>,
    pub get_progress: Arc<dyn GetProgressUseCase + Send + Sync>,
}
