mod get_course;
mod list_courses;

pub use get_course::get_course_handler;
pub use list_courses::list_courses_handler;

pub use get_course::__path_get_course_handler;
pub use list_courses::__path_list_courses_handler;
