pub mod fetch_profile;
pub mod resend_verification;
pub mod sign_in;
pub mod signup;
pub mod verify_email;
pub mod verify_inactive_users;

pub use fetch_profile::{FetchProfileError, FetchProfileUseCase};
pub use resend_verification::{
    ResendVerificationError, ResendVerificationOutput, ResendVerificationUseCase,
};
pub use sign_in::{SignInError, SignInOutput, SignInUseCase};
pub use signup::{SignupError, SignupInput, SignupOutput, SignupUseCase};
pub use verify_email::{VerifyEmailError, VerifyEmailUseCase};
pub use verify_inactive_users::{
    VerifyInactiveUsersError, VerifyInactiveUsersOutput, VerifyInactiveUsersUseCase,
};
