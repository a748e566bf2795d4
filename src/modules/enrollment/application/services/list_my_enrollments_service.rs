use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::enrollment::application::domain::entities::Enrollment;
use crate::modules::enrollment::application::ports::incoming::use_cases::list_my_enrollments::{
    ListMyEnrollmentsError, ListMyEnrollmentsUseCase,
};
use crate::shared::storage::Storage;

pub struct ListMyEnrollmentsService {
    storage: Storage,
}

impl ListMyEnrollmentsService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ListMyEnrollmentsUseCase for ListMyEnrollmentsService {
    async fn execute(&self, user_id: Uuid) -> Result<Vec<Enrollment>, ListMyEnrollmentsError> {
        self.storage
            .resolve()
            .enrollments
            .list_by_user(user_id)
            .await
            .map_err(|e| ListMyEnrollmentsError::RepositoryError(e.to_string()))
    }
}
