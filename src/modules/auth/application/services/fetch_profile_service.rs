use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::UserProfile;
use crate::modules::auth::application::ports::incoming::use_cases::fetch_profile::{
    FetchProfileError, FetchProfileUseCase,
};
use crate::shared::storage::Storage;

pub struct FetchProfileService {
    storage: Storage,
}

impl FetchProfileService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl FetchProfileUseCase for FetchProfileService {
    async fn execute(&self, user_id: Uuid) -> Result<UserProfile, FetchProfileError> {
        self.storage
            .resolve()
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| FetchProfileError::RepositoryError(e.to_string()))?
            .map(|u| u.profile())
            .ok_or(FetchProfileError::UserNotFound)
    }
}
