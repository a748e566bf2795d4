pub mod auth;
pub mod course;
pub mod email;
pub mod enrollment;
pub mod grading;
pub mod payment;
