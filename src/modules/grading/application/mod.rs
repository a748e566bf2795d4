pub mod domain;
pub mod grading_use_cases;
pub mod ports;
pub mod services;
