use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::{NewUser, User};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Identity Store. Every mutation is a single-record update so that each one
/// is atomic on either backend.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError>;

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, UserRepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError>;

    /// Verifies the user holding `token_hash` if it is still valid at `now`.
    /// Marks them verified and clears the token in one step; returns `None`
    /// when no user holds a live token with that hash.
    async fn consume_verification_token(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Replaces any previous token, which becomes permanently invalid.
    async fn set_verification_token(
        &self,
        user_id: Uuid,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), UserRepositoryError>;

    /// Marks the user verified and clears any token.
    async fn mark_verified(&self, user_id: Uuid) -> Result<User, UserRepositoryError>;

    async fn touch_activity(
        &self,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), UserRepositoryError>;

    /// Unverified users whose last activity is strictly before `cutoff`.
    async fn find_unverified_inactive_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<User>, UserRepositoryError>;
}
