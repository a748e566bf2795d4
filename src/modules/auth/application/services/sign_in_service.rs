use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::auth::application::ports::incoming::use_cases::sign_in::{
    SignInError, SignInOutput, SignInUseCase,
};
use crate::modules::auth::application::ports::outgoing::SessionTokenProvider;
use crate::shared::clock::Clock;
use crate::shared::storage::Storage;

pub struct SignInService {
    storage: Storage,
    sessions: Arc<dyn SessionTokenProvider>,
    clock: Arc<dyn Clock>,
}

impl SignInService {
    pub fn new(
        storage: Storage,
        sessions: Arc<dyn SessionTokenProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            storage,
            sessions,
            clock,
        }
    }
}

#[async_trait]
impl SignInUseCase for SignInService {
    async fn execute(&self, email: &str) -> Result<SignInOutput, SignInError> {
        let store = self.storage.resolve();

        let mut user = store
            .users
            .find_by_email(email.trim())
            .await
            .map_err(|e| SignInError::RepositoryError(e.to_string()))?
            .ok_or(SignInError::UserNotFound)?;

        let now = self.clock.now();
        store
            .users
            .touch_activity(user.id, now)
            .await
            .map_err(|e| SignInError::RepositoryError(e.to_string()))?;
        user.last_activity = now;

        let session_token = self
            .sessions
            .issue(user.id, user.is_admin)
            .map_err(|e| SignInError::SessionError(e.to_string()))?;

        tracing::info!(user_id = %user.id, "User signed in");

        Ok(SignInOutput {
            user: user.profile(),
            session_token,
        })
    }
}
