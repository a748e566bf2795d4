mod create_submission;
mod grade_submission;
mod list_submissions;

pub use create_submission::{create_submission_handler, CreateSubmissionRequestDto};
pub use grade_submission::{grade_submission_handler, GradeSubmissionRequestDto};
pub use list_submissions::list_submissions_handler;

pub use create_submission::__path_create_submission_handler;
pub use grade_submission::__path_grade_submission_handler;
pub use list_submissions::__path_list_submissions_handler;
