pub mod fetch_profile_service;
pub mod resend_verification_service;
pub mod sign_in_service;
pub mod signup_service;
pub mod verification;
pub mod verify_email_service;
pub mod verify_inactive_users_service;

pub use fetch_profile_service::FetchProfileService;
pub use resend_verification_service::ResendVerificationService;
pub use sign_in_service::SignInService;
pub use signup_service::SignupService;
pub use verify_email_service::VerifyEmailService;
pub use verify_inactive_users_service::VerifyInactiveUsersService;
