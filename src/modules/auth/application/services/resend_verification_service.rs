use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::verification_token_expiry;
use crate::modules::auth::application::ports::incoming::use_cases::resend_verification::{
    ResendVerificationError, ResendVerificationOutput, ResendVerificationUseCase,
};
use crate::modules::auth::application::ports::outgoing::UserRepositoryError;
use crate::modules::auth::application::services::verification::{
    generate_verification_token, hash_token,
};
use crate::modules::email::application::ports::outgoing::UserEmailNotifier;
use crate::shared::clock::Clock;
use crate::shared::storage::Storage;

pub const MSG_RESENT: &str = "Verification email sent. Please check your inbox.";
pub const MSG_RESEND_UNAVAILABLE: &str =
    "Email delivery is unavailable; your account will be verified manually.";

pub struct ResendVerificationService {
    storage: Storage,
    notifier: Arc<dyn UserEmailNotifier>,
    clock: Arc<dyn Clock>,
}

impl ResendVerificationService {
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
impl ResendVerificationUseCase for ResendVerificationService {
    async fn execute(
        &self,
        user_id: Uuid,
    ) -> Result<ResendVerificationOutput, ResendVerificationError> {
        let store = self.storage.resolve();
        let user = store
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| ResendVerificationError::RepositoryError(e.to_string()))?
            .ok_or(ResendVerificationError::UserNotFound)?;

        if user.is_verified {
            return Err(ResendVerificationError::AlreadyVerified);
        }

        // Overwrites the previous hash, which retires the old token.
        let token = generate_verification_token();
        store
            .users
            .set_verification_token(
                user.id,
                hash_token(&token),
                verification_token_expiry(self.clock.now()),
            )
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => ResendVerificationError::UserNotFound,
                other => ResendVerificationError::RepositoryError(other.to_string()),
            })?;

        let email_sent = match self.notifier.send_verification_email(&user, &token).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Verification email not delivered");
                false
            }
        };

        Ok(ResendVerificationOutput {
            message: if email_sent { MSG_RESENT } else { MSG_RESEND_UNAVAILABLE }.to_string(),
            email_sent,
        })
    }
}
