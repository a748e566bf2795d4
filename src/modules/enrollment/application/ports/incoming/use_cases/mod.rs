pub mod check_access;
pub mod complete_course;
pub mod enroll;
pub mod get_progress;
pub mod list_my_enrollments;
pub mod record_lesson_progress;

pub use check_access::{AccessCheckOutput, CheckAccessError, CheckAccessUseCase};
pub use complete_course::{CompleteCourseError, CompleteCourseOutput, CompleteCourseUseCase};
pub use enroll::{EnrollError, EnrollOutput, EnrollUseCase};
pub use get_progress::{GetProgressError, GetProgressUseCase};
pub use list_my_enrollments::{ListMyEnrollmentsError, ListMyEnrollmentsUseCase};
pub use record_lesson_progress::{RecordLessonProgressError, RecordLessonProgressUseCase};
