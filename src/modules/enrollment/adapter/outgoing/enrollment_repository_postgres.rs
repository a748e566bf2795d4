use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::enrollment::application::domain::entities::{
    Enrollment, NewEnrollment, PaymentRecord,
};
use crate::modules::enrollment::application::ports::outgoing::enrollment_repository::{
    EnrollmentRepository, EnrollmentRepositoryError,
};

use super::sea_orm_entity::enrollments::{
    ActiveModel as EnrollmentActiveModel, Column as EnrollmentColumn,
    Entity as EnrollmentEntity, Model as EnrollmentModel,
};

#[derive(Clone, Debug)]
pub struct EnrollmentRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl EnrollmentRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn to_domain(model: EnrollmentModel) -> Enrollment {
        Enrollment {
            id: model.id,
            user_id: model.user_id,
            course_id: model.course_id,
            has_access: model.has_access,
            enrolled_at: model.enrolled_at.with_timezone(&Utc),
            completed_at: model.completed_at.map(|t| t.with_timezone(&Utc)),
            access_expires_at: model.access_expires_at.map(|t| t.with_timezone(&Utc)),
            payment_id: model.payment_id,
            paid_amount: model.paid_amount,
        }
    }

    fn db_err(e: DbErr) -> EnrollmentRepositoryError {
        EnrollmentRepositoryError::DatabaseError(e.to_string())
    }

    async fn find_model(
        &self,
        enrollment_id: Uuid,
    ) -> Result<EnrollmentModel, EnrollmentRepositoryError> {
        EnrollmentEntity::find_by_id(enrollment_id)
            .one(&*self.db)
            .await
            .map_err(Self::db_err)?
            .ok_or(EnrollmentRepositoryError::NotFound)
    }
}

#[async_trait]
impl EnrollmentRepository for EnrollmentRepositoryPostgres {
    async fn create_enrollment(
        &self,
        enrollment: NewEnrollment,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        let active = EnrollmentActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(enrollment.user_id),
            course_id: Set(enrollment.course_id),
            has_access: Set(enrollment.has_access),
            enrolled_at: Set(enrollment.enrolled_at.fixed_offset()),
            completed_at: Set(None),
            access_expires_at: Set(None),
            payment_id: Set(None),
            paid_amount: Set(None),
        };

        let inserted = active.insert(&*self.db).await.map_err(|e| {
            let err_str = e.to_string().to_lowercase();
            if err_str.contains("23505")
                || err_str.contains("duplicate key")
                || err_str.contains("unique constraint")
            {
                return EnrollmentRepositoryError::AlreadyEnrolled;
            }
            Self::db_err(e)
        })?;

        Ok(Self::to_domain(inserted))
    }

    async fn find_by_id(
        &self,
        enrollment_id: Uuid,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        let model = EnrollmentEntity::find_by_id(enrollment_id)
            .one(&*self.db)
            .await
            .map_err(Self::db_err)?;
        Ok(model.map(Self::to_domain))
    }

    async fn find_by_user_and_course(
        &self,
        user_id: Uuid,
        course_id: &str,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        let model = EnrollmentEntity::find()
            .filter(EnrollmentColumn::UserId.eq(user_id))
            .filter(EnrollmentColumn::CourseId.eq(course_id))
            .order_by_desc(EnrollmentColumn::EnrolledAt)
            .one(&*self.db)
            .await
            .map_err(Self::db_err)?;
        Ok(model.map(Self::to_domain))
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        let models = EnrollmentEntity::find()
            .filter(EnrollmentColumn::UserId.eq(user_id))
            .order_by_desc(EnrollmentColumn::EnrolledAt)
            .all(&*self.db)
            .await
            .map_err(Self::db_err)?;
        Ok(models.into_iter().map(Self::to_domain).collect())
    }

    async fn grant_access(&self, enrollment_id: Uuid) -> Result<(), EnrollmentRepositoryError> {
        let result = EnrollmentEntity::update_many()
            .col_expr(EnrollmentColumn::HasAccess, Expr::value(true))
            .filter(EnrollmentColumn::Id.eq(enrollment_id))
            .exec(&*self.db)
            .await
            .map_err(Self::db_err)?;

        if result.rows_affected == 0 {
            return Err(EnrollmentRepositoryError::NotFound);
        }
        Ok(())
    }

    async fn grant_access_for_user(&self, user_id: Uuid) -> Result<u64, EnrollmentRepositoryError> {
        let result = EnrollmentEntity::update_many()
            .col_expr(EnrollmentColumn::HasAccess, Expr::value(true))
            .filter(EnrollmentColumn::UserId.eq(user_id))
            .filter(EnrollmentColumn::HasAccess.eq(false))
            .exec(&*self.db)
            .await
            .map_err(Self::db_err)?;
        Ok(result.rows_affected)
    }

    async fn record_payment(
        &self,
        enrollment_id: Uuid,
        payment_id: String,
        paid_amount: i64,
    ) -> Result<PaymentRecord, EnrollmentRepositoryError> {
        let result = EnrollmentEntity::update_many()
            .col_expr(EnrollmentColumn::HasAccess, Expr::value(true))
            .col_expr(EnrollmentColumn::PaymentId, Expr::value(payment_id))
            .col_expr(EnrollmentColumn::PaidAmount, Expr::value(paid_amount))
            .filter(EnrollmentColumn::Id.eq(enrollment_id))
            .filter(EnrollmentColumn::PaymentId.is_null())
            .exec(&*self.db)
            .await
            .map_err(Self::db_err)?;

        let current = Self::to_domain(self.find_model(enrollment_id).await?);
        if result.rows_affected == 0 {
            Ok(PaymentRecord::AlreadyRecorded(current))
        } else {
            Ok(PaymentRecord::Recorded(current))
        }
    }

    async fn mark_completed(
        &self,
        enrollment_id: Uuid,
        completed_at: DateTime<Utc>,
        access_expires_at: DateTime<Utc>,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        let mut active: EnrollmentActiveModel = self.find_model(enrollment_id).await?.into();
        active.completed_at = Set(Some(completed_at.fixed_offset()));
        active.access_expires_at = Set(Some(access_expires_at.fixed_offset()));

        let updated = active.update(&*self.db).await.map_err(Self::db_err)?;
        Ok(Self::to_domain(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(payment_id: Option<&str>) -> EnrollmentModel {
        EnrollmentModel {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            course_id: "ai-agents".to_string(),
            has_access: payment_id.is_some(),
            enrolled_at: Utc::now().fixed_offset(),
            completed_at: None,
            access_expires_at: None,
            payment_id: payment_id.map(str::to_string),
            paid_amount: payment_id.map(|_| 19900),
        }
    }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[tokio::test]
    async fn create_maps_unique_violation_to_already_enrolled() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom(
                "duplicate key value violates unique constraint".to_string(),
            )])
            .into_connection();
        let repo = EnrollmentRepositoryPostgres::new(Arc::new(db));

        let result = repo
            .create_enrollment(NewEnrollment {
                user_id: Uuid::new_v4(),
                course_id: "ai-agents".to_string(),
                has_access: false,
                enrolled_at: Utc::now(),
            })
            .await;

        assert_eq!(result, Err(EnrollmentRepositoryError::AlreadyEnrolled));
    }

    #[tokio::test]
    async fn record_payment_reports_recorded() {
        let paid = model(Some("txn-1"));
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(1)])
            .append_query_results(vec![vec![paid.clone()]])
            .into_connection();
        let repo = EnrollmentRepositoryPostgres::new(Arc::new(db));

        let record = repo
            .record_payment(paid.id, "txn-1".to_string(), 19900)
            .await
            .unwrap();

        assert!(matches!(record, PaymentRecord::Recorded(e) if e.has_access));
    }

    #[tokio::test]
    async fn record_payment_does_not_overwrite_existing_payment() {
        let paid = model(Some("txn-1"));
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(0)])
            .append_query_results(vec![vec![paid.clone()]])
            .into_connection();
        let repo = EnrollmentRepositoryPostgres::new(Arc::new(db));

        let record = repo
            .record_payment(paid.id, "txn-2".to_string(), 19900)
            .await
            .unwrap();

        match record {
            PaymentRecord::AlreadyRecorded(e) => {
                assert_eq!(e.payment_id.as_deref(), Some("txn-1"))
            }
            other => panic!("expected AlreadyRecorded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn record_payment_on_missing_enrollment_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(0)])
            .append_query_results(vec![Vec::<EnrollmentModel>::new()])
            .into_connection();
        let repo = EnrollmentRepositoryPostgres::new(Arc::new(db));

        let result = repo
            .record_payment(Uuid::new_v4(), "txn-1".to_string(), 100)
            .await;

        assert_eq!(result, Err(EnrollmentRepositoryError::NotFound));
    }

    #[tokio::test]
    async fn grant_access_for_user_returns_row_count() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(2)])
            .into_connection();
        let repo = EnrollmentRepositoryPostgres::new(Arc::new(db));

        assert_eq!(repo.grant_access_for_user(Uuid::new_v4()).await, Ok(2));
    }
}
