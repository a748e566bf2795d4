pub mod access_policy;
pub mod completion_policy;

pub use access_policy::{evaluate_access, evaluate_content_access, AccessDecision, AccessDenial};
pub use completion_policy::CompletionPolicy;
