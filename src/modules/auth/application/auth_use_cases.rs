use std::sync::Arc;

use crate::modules::auth::application::ports::incoming::use_cases::{
    FetchProfileUseCase, ResendVerificationUseCase, SignInUseCase, SignupUseCase,
    VerifyEmailUseCase, VerifyInactiveUsersUseCase,
};

#[derive(Clone)]
pub struct AuthUseCases {
    pub signup: Arc<dyn SignupUseCase + Send + Sync>,
    pub sign_in: Arc<dyn SignInUseCase + Send + Sync>,
    pub verify_email: Arc<dyn VerifyEmailUseCase + Send + Sync>,
    pub resend_verification: Arc<dyn ResendVerificationUseCase + Send + Sync>,
    pub fetch_profile: Arc<dyn FetchProfileUseCase + Send + Sync>,
    pub verify_inactive_users: Arc<dyn VerifyInactiveUsersUseCase + Send + Sync>,
}
