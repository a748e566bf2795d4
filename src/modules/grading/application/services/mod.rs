pub mod grade_submission_service;
pub mod submission_service;

pub use grade_submission_service::GradeSubmissionService;
pub use submission_service::SubmissionService;
