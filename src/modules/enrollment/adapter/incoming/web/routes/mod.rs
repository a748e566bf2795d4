mod check_access;
mod complete_course;
mod enroll;
mod get_progress;
mod list_my_enrollments;
mod record_lesson_progress;

pub use check_access::check_access_handler;
pub use complete_course::{complete_course_handler, CompleteCourseRequestDto};
pub use enroll::{enroll_handler, EnrollRequestDto};
pub use get_progress::get_progress_handler;
pub use list_my_enrollments::list_my_enrollments_handler;
pub use record_lesson_progress::{record_lesson_progress_handler, LessonCompleteRequestDto};

pub use check_access::__path_check_access_handler;
pub use complete_course::__path_complete_course_handler;
pub use enroll::__path_enroll_handler;
pub use get_progress::__path_get_progress_handler;
pub use list_my_enrollments::__path_list_my_enrollments_handler;
pub use record_lesson_progress::__path_record_lesson_progress_handler;
