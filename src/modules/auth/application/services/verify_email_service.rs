use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::auth::application::domain::entities::UserProfile;
use crate::modules::auth::application::ports::incoming::use_cases::verify_email::{
    VerifyEmailError, VerifyEmailUseCase,
};
use crate::modules::auth::application::services::verification::hash_token;
use crate::modules::email::application::ports::outgoing::UserEmailNotifier;
use crate::shared::clock::Clock;
use crate::shared::storage::Storage;

/// Consumes a verification token. On success every enrollment the user
/// already holds is unlocked, then the welcome mail goes out.
pub struct VerifyEmailService {
    storage: Storage,
    notifier: Arc<dyn UserEmailNotifier>,
    clock: Arc<dyn Clock>,
}

impl VerifyEmailService {
    pub fn new(
        storage: Storage,
        notifier: Arc<dyn UserEmailNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            storage,
            notifier,
            clock,
        }
    }
}

#[async_trait]
impl VerifyEmailUseCase for VerifyEmailService {
    async fn execute(&self, token: &str) -> Result<UserProfile, VerifyEmailError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(VerifyEmailError::InvalidOrExpiredToken);
        }

        let store = self.storage.resolve();
        let user = store
            .users
            .consume_verification_token(&hash_token(token), self.clock.now())
            .await
            .map_err(|e| VerifyEmailError::RepositoryError(e.to_string()))?
            .ok_or(VerifyEmailError::InvalidOrExpiredToken)?;

        let unlocked = store
            .enrollments
            .grant_access_for_user(user.id)
            .await
            .map_err(|e| VerifyEmailError::RepositoryError(e.to_string()))?;

        tracing::info!(user_id = %user.id, unlocked, "Email verified");

        if let Err(e) = self.notifier.send_welcome_email(&user).await {
            tracing::warn!(user_id = %user.id, error = %e, "Welcome email not delivered");
        }

        Ok(user.profile())
    }
}
