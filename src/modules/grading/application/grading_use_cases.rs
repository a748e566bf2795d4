use std::sync::Arc;

use crate::modules::grading::application::ports::incoming::use_cases::{
    CreateSubmissionUseCase, GradeSubmissionUseCase, ListSubmissionsUseCase,
};

#[derive(Clone)]
pub struct GradingUseCases {
    pub submit: Arc<dyn CreateSubmissionUseCase + Send + Sync>,
    pub list: Arc<dyn ListSubmissionsUseCase + Send + Sync>,
    pub grade: Arc<dyn GradeSubmissionUseCase + Send + Sync>,
}
