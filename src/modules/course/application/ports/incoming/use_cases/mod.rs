pub mod get_course;
pub mod list_courses;

pub use get_course::{GetCourseError, GetCourseUseCase};
pub use list_courses::{ListCoursesError, ListCoursesUseCase};
