use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::{NewUser, User};
use crate::modules::auth::application::ports::outgoing::user_repository::{
    UserRepository, UserRepositoryError,
};

use super::sea_orm_entity::users::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as UserEntity, Model as UserModel,
};

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn to_domain(model: UserModel) -> User {
        User {
            id: model.id,
            email: model.email,
            name: model.name,
            is_verified: model.is_verified,
            is_admin: model.is_admin,
            verification_token_hash: model.verification_token_hash,
            verification_token_expires_at: model
                .verification_token_expires_at
                .map(|t| t.with_timezone(&Utc)),
            last_activity: model.last_activity.with_timezone(&Utc),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }

    fn db_err(e: DbErr) -> UserRepositoryError {
        UserRepositoryError::DatabaseError(e.to_string())
    }

    async fn find_model(&self, user_id: Uuid) -> Result<UserModel, UserRepositoryError> {
        UserEntity::find_by_id(user_id)
            .one(&*self.db)
            .await
            .map_err(Self::db_err)?
            .ok_or(UserRepositoryError::UserNotFound)
    }
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let active_user = UserActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(user.email),
            name: Set(user.name),
            is_verified: Set(user.is_verified),
            is_admin: Set(user.is_admin),
            verification_token_hash: Set(user.verification_token_hash),
            verification_token_expires_at: Set(user
                .verification_token_expires_at
                .map(|t| t.fixed_offset())),
            last_activity: Set(user.created_at.fixed_offset()),
            created_at: Set(user.created_at.fixed_offset()),
        };

        let inserted = active_user.insert(&*self.db).await.map_err(|e| {
            let err_str = e.to_string().to_lowercase();
            if err_str.contains("23505")
                || err_str.contains("duplicate key")
                || err_str.contains("unique constraint")
            {
                return UserRepositoryError::UserAlreadyExists;
            }
            Self::db_err(e)
        })?;

        Ok(Self::to_domain(inserted))
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, UserRepositoryError> {
        let model = UserEntity::find_by_id(user_id)
            .one(&*self.db)
            .await
            .map_err(Self::db_err)?;
        Ok(model.map(Self::to_domain))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        let model = UserEntity::find()
            .filter(UserColumn::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(Self::db_err)?;
        Ok(model.map(Self::to_domain))
    }

    async fn consume_verification_token(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, UserRepositoryError> {
        // Single conditional UPDATE so two concurrent verifications of the
        // same token cannot both succeed.
        let candidate = UserEntity::find()
            .filter(UserColumn::VerificationTokenHash.eq(token_hash))
            .one(&*self.db)
            .await
            .map_err(Self::db_err)?;

        let Some(candidate) = candidate else {
            return Ok(None);
        };

        let result = UserEntity::update_many()
            .col_expr(UserColumn::IsVerified, Expr::value(true))
            .col_expr(
                UserColumn::VerificationTokenHash,
                Expr::value(Option::<String>::None),
            )
            .col_expr(
                UserColumn::VerificationTokenExpiresAt,
                Expr::value(Option::<DateTime<chrono::FixedOffset>>::None),
            )
            .filter(UserColumn::Id.eq(candidate.id))
            .filter(UserColumn::VerificationTokenHash.eq(token_hash))
            .filter(UserColumn::VerificationTokenExpiresAt.gt(now.fixed_offset()))
            .exec(&*self.db)
            .await
            .map_err(Self::db_err)?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let verified = self.find_model(candidate.id).await?;
        Ok(Some(Self::to_domain(verified)))
    }

    async fn set_verification_token(
        &self,
        user_id: Uuid,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), UserRepositoryError> {
        let mut active_user: UserActiveModel = self.find_model(user_id).await?.into();
        active_user.verification_token_hash = Set(Some(token_hash));
        active_user.verification_token_expires_at = Set(Some(expires_at.fixed_offset()));

        active_user
            .update(&*self.db)
            .await
            .map_err(Self::db_err)?;
        Ok(())
    }

    async fn mark_verified(&self, user_id: Uuid) -> Result<User, UserRepositoryError> {
        let mut active_user: UserActiveModel = self.find_model(user_id).await?.into();
        active_user.is_verified = Set(true);
        active_user.verification_token_hash = Set(None);
        active_user.verification_token_expires_at = Set(None);

        let updated = active_user
            .update(&*self.db)
            .await
            .map_err(Self::db_err)?;
        Ok(Self::to_domain(updated))
    }

    async fn touch_activity(
        &self,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), UserRepositoryError> {
        let result = UserEntity::update_many()
            .col_expr(UserColumn::LastActivity, Expr::value(at.fixed_offset()))
            .filter(UserColumn::Id.eq(user_id))
            .exec(&*self.db)
            .await
            .map_err(Self::db_err)?;

        if result.rows_affected == 0 {
            return Err(UserRepositoryError::UserNotFound);
        }
        Ok(())
    }

    async fn find_unverified_inactive_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<User>, UserRepositoryError> {
        let models = UserEntity::find()
            .filter(UserColumn::IsVerified.eq(false))
            .filter(UserColumn::LastActivity.lt(cutoff.fixed_offset()))
            .all(&*self.db)
            .await
            .map_err(Self::db_err)?;
        Ok(models.into_iter().map(Self::to_domain).collect())
    }
}
