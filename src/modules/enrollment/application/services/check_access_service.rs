use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::enrollment::application::domain::policies::{
    evaluate_content_access, AccessDecision,
};
use crate::modules::enrollment::application::ports::incoming::use_cases::check_access::{
    AccessCheckOutput, CheckAccessError, CheckAccessUseCase,
};
use crate::shared::clock::Clock;
use crate::shared::storage::Storage;

/// Reads the latest user and enrollment on every call; nothing is cached.
pub struct CheckAccessService {
    storage: Storage,
    clock: Arc<dyn Clock>,
}

impl CheckAccessService {
    pub fn new(storage: Storage, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }
}

#[async_trait]
impl CheckAccessUseCase for CheckAccessService {
    async fn execute(
        &self,
        user_id: Uuid,
        course_id: &str,
    ) -> Result<AccessCheckOutput, CheckAccessError> {
        let store = self.storage.resolve();

        let user = store
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| CheckAccessError::RepositoryError(e.to_string()))?
            .ok_or(CheckAccessError::UserNotFound)?;

        let enrollment = store
            .enrollments
            .find_by_user_and_course(user_id, course_id)
            .await
            .map_err(|e| CheckAccessError::RepositoryError(e.to_string()))?;

        let output = match evaluate_content_access(
            user.is_verified,
            enrollment.as_ref(),
            self.clock.now(),
        ) {
            AccessDecision::Granted => AccessCheckOutput {
                has_access: true,
                reason: None,
            },
            AccessDecision::Denied(denial) => AccessCheckOutput {
                has_access: false,
                reason: denial.reason().map(str::to_string),
            },
        };

        Ok(output)
    }
}
