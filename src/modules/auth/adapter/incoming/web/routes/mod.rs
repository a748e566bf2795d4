mod me;
mod resend_verification;
mod sign_in;
mod sign_out;
mod signup;
mod verify_email;
mod verify_inactive_users;

pub use me::me_handler;
pub use resend_verification::resend_verification_handler;
pub use sign_in::{sign_in_handler, SignInRequestDto};
pub use sign_out::{sign_out_handler, SignOutResponse};
pub use signup::{signup_handler, SignupRequestDto};
pub use verify_email::verify_email_handler;
pub use verify_inactive_users::verify_inactive_users_handler;

pub use me::__path_me_handler;
pub use resend_verification::__path_resend_verification_handler;
pub use sign_in::__path_sign_in_handler;
pub use sign_out::__path_sign_out_handler;
pub use signup::__path_signup_handler;
pub use verify_email::__path_verify_email_handler;
pub use verify_inactive_users::__path_verify_inactive_users_handler;
