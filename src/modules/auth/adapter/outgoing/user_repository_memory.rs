use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::{NewUser, User};
use crate::modules::auth::application::ports::outgoing::user_repository::{
    UserRepository, UserRepositoryError,
};

/// Process-local user table used while the database is unavailable.
/// Contents are lost on restart.
#[derive(Clone, Debug, Default)]
pub struct UserRepositoryMemory {
    users: Arc<DashMap<Uuid, User>>,
    // email -> id, doubles as the unique index
    emails: Arc<DashMap<String, Uuid>>,
}

impl UserRepositoryMemory {
    pub fn new() -> Self {
        Self::default()
    }

    fn update<F>(&self, user_id: Uuid, apply: F) -> Result<User, UserRepositoryError>
    where
        F: FnOnce(&mut User),
    {
        let mut entry = self
            .users
            .get_mut(&user_id)
            .ok_or(UserRepositoryError::UserNotFound)?;
        apply(entry.value_mut());
        Ok(entry.value().clone())
    }
}

#[async_trait]
impl UserRepository for UserRepositoryMemory {
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let id = Uuid::new_v4();
        match self.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(UserRepositoryError::UserAlreadyExists),
            Entry::Vacant(slot) => {
                let created = User {
                    id,
                    email: user.email,
                    name: user.name,
                    is_verified: user.is_verified,
                    is_admin: user.is_admin,
                    verification_token_hash: user.verification_token_hash,
                    verification_token_expires_at: user.verification_token_expires_at,
                    last_activity: user.created_at,
                    created_at: user.created_at,
                };
                self.users.insert(id, created.clone());
                slot.insert(id);
                Ok(created)
            }
        }
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.users.get(&user_id).map(|u| u.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        let Some(id) = self.emails.get(email).map(|e| *e.value()) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn consume_verification_token(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, UserRepositoryError> {
        let candidate = self
            .users
            .iter()
            .find(|u| u.verification_token_hash.as_deref() == Some(token_hash))
            .map(|u| u.id);

        let Some(user_id) = candidate else {
            return Ok(None);
        };

        let Some(mut entry) = self.users.get_mut(&user_id) else {
            return Ok(None);
        };

        // Re-check under the shard lock; another caller may have won.
        let user = entry.value_mut();
        let still_valid = user.verification_token_hash.as_deref() == Some(token_hash)
            && user
                .verification_token_expires_at
                .is_some_and(|expires_at| expires_at > now);
        if !still_valid {
            return Ok(None);
        }

        user.is_verified = true;
        user.verification_token_hash = None;
        user.verification_token_expires_at = None;
        Ok(Some(user.clone()))
    }

    async fn set_verification_token(
        &self,
        user_id: Uuid,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), UserRepositoryError> {
        self.update(user_id, |u| {
            u.verification_token_hash = Some(token_hash);
            u.verification_token_expires_at = Some(expires_at);
        })?;
        Ok(())
    }

    async fn mark_verified(&self, user_id: Uuid) -> Result<User, UserRepositoryError> {
        self.update(user_id, |u| {
            u.is_verified = true;
            u.verification_token_hash = None;
            u.verification_token_expires_at = None;
        })
    }

    async fn touch_activity(
        &self,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), UserRepositoryError> {
        self.update(user_id, |u| u.last_activity = at)?;
        Ok(())
    }

    async fn find_unverified_inactive_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<User>, UserRepositoryError> {
        Ok(self
            .users
            .iter()
            .filter(|u| !u.is_verified && u.last_activity < cutoff)
            .map(|u| u.value().clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_user(email: &str, token_hash: Option<&str>, expires_at: DateTime<Utc>) -> NewUser {
        NewUser {
            email: email.to_string(),
            name: "Ada".to_string(),
            is_admin: false,
            is_verified: token_hash.is_none(),
            verification_token_hash: token_hash.map(str::to_string),
            verification_token_expires_at: token_hash.map(|_| expires_at),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn email_is_unique() {
        let repo = UserRepositoryMemory::new();
        let expires = Utc::now() + Duration::hours(24);

        repo.create_user(new_user("a@x.com", Some("h1"), expires))
            .await
            .unwrap();
        let second = repo
            .create_user(new_user("a@x.com", Some("h2"), expires))
            .await;

        assert_eq!(second, Err(UserRepositoryError::UserAlreadyExists));
    }

    #[tokio::test]
    async fn token_is_single_use() {
        let repo = UserRepositoryMemory::new();
        let now = Utc::now();
        let user = repo
            .create_user(new_user("a@x.com", Some("h1"), now + Duration::hours(24)))
            .await
            .unwrap();

        let first = repo.consume_verification_token("h1", now).await.unwrap();
        let second = repo.consume_verification_token("h1", now).await.unwrap();

        let verified = first.unwrap();
        assert_eq!(verified.id, user.id);
        assert!(verified.is_verified);
        assert!(verified.verification_token_hash.is_none());
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn expired_token_is_rejected_and_left_in_place() {
        let repo = UserRepositoryMemory::new();
        let now = Utc::now();
        let user = repo
            .create_user(new_user("a@x.com", Some("h1"), now))
            .await
            .unwrap();

        let result = repo.consume_verification_token("h1", now).await.unwrap();

        assert!(result.is_none());
        let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert!(!stored.is_verified);
    }

    #[tokio::test]
    async fn inactive_sweep_only_returns_unverified_idle_users() {
        let repo = UserRepositoryMemory::new();
        let now = Utc::now();
        let expires = now + Duration::hours(24);

        let idle = repo
            .create_user(new_user("idle@x.com", Some("h1"), expires))
            .await
            .unwrap();
        let active = repo
            .create_user(new_user("active@x.com", Some("h2"), expires))
            .await
            .unwrap();
        repo.create_user(new_user("done@x.com", None, expires))
            .await
            .unwrap();

        repo.touch_activity(idle.id, now - Duration::days(3))
            .await
            .unwrap();
        repo.touch_activity(active.id, now).await.unwrap();

        let found = repo
            .find_unverified_inactive_since(now - Duration::days(2))
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, idle.id);
    }
}
