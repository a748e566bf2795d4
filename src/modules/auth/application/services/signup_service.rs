use async_trait::async_trait;
use email_address::EmailAddress;
use std::sync::Arc;

use crate::modules::auth::application::domain::entities::{
    verification_token_expiry, AdminAllowList, NewUser,
};
use crate::modules::auth::application::ports::incoming::use_cases::signup::{
    SignupError, SignupInput, SignupOutput, SignupUseCase, MSG_ADMIN_CREATED, MSG_CHECK_EMAIL,
    MSG_EMAIL_UNAVAILABLE,
};
use crate::modules::auth::application::ports::outgoing::{
    SessionTokenProvider, UserRepositoryError,
};
use crate::modules::auth::application::services::verification::{
    generate_verification_token, hash_token,
};
use crate::modules::email::application::ports::outgoing::UserEmailNotifier;
use crate::shared::clock::Clock;
use crate::shared::storage::Storage;

/// Creates the account, then hands the verification token to the mailer.
/// A failed mail does not fail the signup.
pub struct SignupService {
    storage: Storage,
    sessions: Arc<dyn SessionTokenProvider>,
    notifier: Arc<dyn UserEmailNotifier>,
    admins: AdminAllowList,
    clock: Arc<dyn Clock>,
}

impl SignupService {
    pub fn new(
        storage: Storage,
        sessions: Arc<dyn SessionTokenProvider>,
        notifier: Arc<dyn UserEmailNotifier>,
        admins: AdminAllowList,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            storage,
            sessions,
            notifier,
            admins,
            clock,
        }
    }

    fn validate(input: &SignupInput) -> Result<(String, String), SignupError> {
        let email = input.email.trim();
        let name = input.name.trim();

        if !EmailAddress::is_valid(email) {
            return Err(SignupError::InvalidInput(
                "A valid email address is required".to_string(),
            ));
        }
        if name.is_empty() {
            return Err(SignupError::InvalidInput("Name is required".to_string()));
        }
        Ok((email.to_string(), name.to_string()))
    }
}

#[async_trait]
impl SignupUseCase for SignupService {
    async fn execute(&self, input: SignupInput) -> Result<SignupOutput, SignupError> {
        let (email, name) = Self::validate(&input)?;
        let store = self.storage.resolve();
        let now = self.clock.now();

        let existing = store
            .users
            .find_by_email(&email)
            .await
            .map_err(|e| SignupError::RepositoryError(e.to_string()))?;
        if existing.is_some() {
            return Err(SignupError::UserAlreadyExists);
        }

        let is_admin = self.admins.contains(&email);
        let token = (!is_admin).then(generate_verification_token);

        let new_user = NewUser {
            email,
            name,
            is_admin,
            is_verified: is_admin,
            verification_token_hash: token.as_deref().map(hash_token),
            verification_token_expires_at: token.as_ref().map(|_| verification_token_expiry(now)),
            created_at: now,
        };

        let user = store.users.create_user(new_user).await.map_err(|e| match e {
            UserRepositoryError::UserAlreadyExists => SignupError::UserAlreadyExists,
            other => SignupError::RepositoryError(other.to_string()),
        })?;

        tracing::info!(user_id = %user.id, is_admin, "User signed up");

        let session_token = self
            .sessions
            .issue(user.id, user.is_admin)
            .map_err(|e| SignupError::SessionError(e.to_string()))?;

        let message = match token {
            None => MSG_ADMIN_CREATED,
            Some(token) => match self.notifier.send_verification_email(&user, &token).await {
                Ok(()) => MSG_CHECK_EMAIL,
                Err(e) => {
                    tracing::warn!(user_id = %user.id, error = %e, "Verification email not delivered");
                    MSG_EMAIL_UNAVAILABLE
                }
            },
        };

        Ok(SignupOutput {
            user: user.profile(),
            session_token,
            message: message.to_string(),
        })
    }
}
