use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;

use crate::modules::auth::application::domain::entities::INACTIVE_UNVERIFIED_AFTER_DAYS;
use crate::modules::auth::application::ports::incoming::use_cases::verify_inactive_users::{
    VerifyInactiveUsersError, VerifyInactiveUsersOutput, VerifyInactiveUsersUseCase,
};
use crate::shared::clock::Clock;
use crate::shared::storage::Storage;

pub struct VerifyInactiveUsersService {
    storage: Storage,
    clock: Arc<dyn Clock>,
}

impl VerifyInactiveUsersService {
    pub fn new(storage: Storage, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }
}

#[async_trait]
impl VerifyInactiveUsersUseCase for VerifyInactiveUsersService {
    async fn execute(&self) -> Result<VerifyInactiveUsersOutput, VerifyInactiveUsersError> {
        let store = self.storage.resolve();
        let cutoff = self.clock.now() - Duration::days(INACTIVE_UNVERIFIED_AFTER_DAYS);

        let stale = store
            .users
            .find_unverified_inactive_since(cutoff)
            .await
            .map_err(|e| VerifyInactiveUsersError::RepositoryError(e.to_string()))?;

        let mut verified_count = 0;
        for user in stale {
            store
                .users
                .mark_verified(user.id)
                .await
                .map_err(|e| VerifyInactiveUsersError::RepositoryError(e.to_string()))?;
            let unlocked = store
                .enrollments
                .grant_access_for_user(user.id)
                .await
                .map_err(|e| VerifyInactiveUsersError::RepositoryError(e.to_string()))?;

            tracing::info!(user_id = %user.id, unlocked, "Inactive user force-verified");
            verified_count += 1;
        }

        Ok(VerifyInactiveUsersOutput { verified_count })
    }
}
