pub mod create_submission;
pub mod grade_submission;
pub mod list_submissions;

pub use create_submission::{CreateSubmissionError, CreateSubmissionInput, CreateSubmissionUseCase};
pub use grade_submission::{GradeSubmissionError, GradeSubmissionInput, GradeSubmissionUseCase};
pub use list_submissions::{ListSubmissionsError, ListSubmissionsUseCase};
