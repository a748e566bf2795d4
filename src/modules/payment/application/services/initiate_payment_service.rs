use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::enrollment::application::domain::entities::{Enrollment, NewEnrollment};
use crate::modules::enrollment::application::domain::policies::evaluate_access;
use crate::modules::enrollment::application::ports::outgoing::EnrollmentRepositoryError;
use crate::modules::payment::application::domain::amount::format_amount;
use crate::modules::payment::application::domain::entities::{
    PaymentRequest, CHECKOUT_TICKET_TTL_HOURS,
};
use crate::modules::payment::application::domain::order_reference::OrderReference;
use crate::modules::payment::application::ports::incoming::use_cases::initiate_payment::{
    InitiatePaymentError, InitiatePaymentOutput, InitiatePaymentUseCase,
};
use crate::modules::payment::application::ports::outgoing::PaymentGateway;
use crate::shared::clock::Clock;
use crate::shared::storage::{Storage, StoreHandle};

pub struct InitiatePaymentService {
    storage: Storage,
    gateway: Arc<dyn PaymentGateway>,
    clock: Arc<dyn Clock>,
}

impl InitiatePaymentService {
    pub fn new(storage: Storage, gateway: Arc<dyn PaymentGateway>, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            gateway,
            clock,
        }
    }

    /// The order reference must point at an enrollment, so one is created
    /// (locked) when the user has not enrolled yet.
    async fn ensure_enrollment(
        &self,
        store: &StoreHandle,
        existing: Option<Enrollment>,
        user_id: Uuid,
        course_id: &str,
    ) -> Result<Enrollment, InitiatePaymentError> {
        if let Some(enrollment) = existing {
            return Ok(enrollment);
        }

        let created = store
            .enrollments
            .create_enrollment(NewEnrollment {
                user_id,
                course_id: course_id.to_string(),
                has_access: false,
                enrolled_at: self.clock.now(),
            })
            .await;

        match created {
            Ok(enrollment) => Ok(enrollment),
            Err(EnrollmentRepositoryError::AlreadyEnrolled) => store
                .enrollments
                .find_by_user_and_course(user_id, course_id)
                .await
                .map_err(|e| InitiatePaymentError::RepositoryError(e.to_string()))?
                .ok_or_else(|| {
                    InitiatePaymentError::RepositoryError(
                        "enrollment vanished after conflict".to_string(),
                    )
                }),
            Err(e) => Err(InitiatePaymentError::RepositoryError(e.to_string())),
        }
    }
}

#[async_trait]
impl InitiatePaymentUseCase for InitiatePaymentService {
    async fn execute(
        &self,
        user_id: Uuid,
        course_id: &str,
    ) -> Result<InitiatePaymentOutput, InitiatePaymentError> {
        let store = self.storage.resolve();
        let now = self.clock.now();

        let course = store
            .courses
            .find_by_id(course_id)
            .await
            .map_err(|e| InitiatePaymentError::RepositoryError(e.to_string()))?
            .ok_or(InitiatePaymentError::CourseNotFound)?;

        if course.is_free() {
            return Err(InitiatePaymentError::CourseIsFree);
        }

        let user = store
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| InitiatePaymentError::RepositoryError(e.to_string()))?
            .ok_or(InitiatePaymentError::UserNotFound)?;

        let existing = store
            .enrollments
            .find_by_user_and_course(user_id, &course.id)
            .await
            .map_err(|e| InitiatePaymentError::RepositoryError(e.to_string()))?;

        if evaluate_access(existing.as_ref(), now).is_granted() {
            return Err(InitiatePaymentError::AlreadyHasAccess);
        }

        let enrollment = self
            .ensure_enrollment(&store, existing, user_id, &course.id)
            .await?;

        let order_id = OrderReference::new(enrollment.id, now).to_string();
        let amount = format_amount(course.price);
        let request = PaymentRequest {
            order_id: order_id.clone(),
            amount: amount.clone(),
            description: course.title.clone(),
            customer_id: user.id.to_string(),
            customer_email: user.email.clone(),
            expires_at: now + Duration::hours(CHECKOUT_TICKET_TTL_HOURS),
        };

        let ticket = self.gateway.preload(request).await.map_err(|e| {
            tracing::error!(user_id = %user_id, course_id = %course.id, order_id = %order_id, error = %e, "Payment preload failed");
            InitiatePaymentError::PaymentInitFailed(e.to_string())
        })?;

        tracing::info!(
            user_id = %user_id,
            course_id = %course.id,
            enrollment_id = %enrollment.id,
            order_id = %order_id,
            "Checkout opened"
        );

        Ok(InitiatePaymentOutput {
            ticket,
            order_id,
            amount,
            course_title: course.title,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::payment::application::ports::outgoing::PaymentGatewayError;
    use crate::tests::support::clock::FixedClock;
    use crate::tests::support::fixtures::insert_user;
    use mockall::mock;

    mock! {
        pub Gateway {}

        #[async_trait]
        impl PaymentGateway for Gateway {
            async fn preload(&self, request: PaymentRequest) -> Result<String, PaymentGatewayError>;
        }
    }

    #[tokio::test]
    async fn opens_checkout_and_creates_locked_enrollment() {
        let storage = Storage::memory_only();
        let clock = Arc::new(FixedClock::default());
        let user = insert_user(&storage, "b@x.com", false).await;
        let expected_expiry = clock.now() + Duration::hours(24);

        let mut gateway = MockGateway::new();
        gateway
            .expect_preload()
            .withf(move |req| {
                req.amount == "199.00"
                    && req.description == "AI Coding Agents"
                    && req.customer_email == "b@x.com"
                    && req.order_id.starts_with("ord-")
                    && req.expires_at == expected_expiry
            })
            .times(1)
            .returning(|_| Ok("tkt-123".to_string()));

        let out = InitiatePaymentService::new(storage.clone(), Arc::new(gateway), clock)
            .execute(user.id, "ai-agents")
            .await
            .unwrap();

        assert_eq!(out.ticket, "tkt-123");
        assert_eq!(out.amount, "199.00");
        assert_eq!(out.course_title, "AI Coding Agents");

        let enrollment = storage
            .resolve()
            .enrollments
            .find_by_user_and_course(user.id, "ai-agents")
            .await
            .unwrap()
            .unwrap();
        assert!(!enrollment.has_access);
        let reference = OrderReference::parse(&out.order_id).unwrap();
        assert_eq!(reference.enrollment_id, enrollment.id);
    }

    #[tokio::test]
    async fn free_course_is_refused_without_calling_gateway() {
        let storage = Storage::memory_only();
        let user = insert_user(&storage, "a@x.com", true).await;
        let mut gateway = MockGateway::new();
        gateway.expect_preload().never();

        let err = InitiatePaymentService::new(
            storage,
            Arc::new(gateway),
            Arc::new(FixedClock::default()),
        )
        .execute(user.id, "security-testing")
        .await
        .unwrap_err();

        assert_eq!(err, InitiatePaymentError::CourseIsFree);
    }

    #[tokio::test]
    async fn current_access_is_refused() {
        let storage = Storage::memory_only();
        let clock = Arc::new(FixedClock::default());
        let user = insert_user(&storage, "a@x.com", true).await;
        storage
            .resolve()
            .enrollments
            .create_enrollment(NewEnrollment {
                user_id: user.id,
                course_id: "ai-agents".to_string(),
                has_access: true,
                enrolled_at: clock.now(),
            })
            .await
            .unwrap();
        let mut gateway = MockGateway::new();
        gateway.expect_preload().never();

        let err = InitiatePaymentService::new(storage, Arc::new(gateway), clock)
            .execute(user.id, "ai-agents")
            .await
            .unwrap_err();

        assert_eq!(err, InitiatePaymentError::AlreadyHasAccess);
    }

    #[tokio::test]
    async fn gateway_failure_surfaces_as_init_failure() {
        let storage = Storage::memory_only();
        let user = insert_user(&storage, "a@x.com", true).await;
        let mut gateway = MockGateway::new();
        gateway
            .expect_preload()
            .times(1)
            .returning(|_| Err(PaymentGatewayError::Unavailable("timeout".to_string())));

        let err = InitiatePaymentService::new(
            storage,
            Arc::new(gateway),
            Arc::new(FixedClock::default()),
        )
        .execute(user.id, "modern-software")
        .await
        .unwrap_err();

        assert!(matches!(err, InitiatePaymentError::PaymentInitFailed(_)));
    }

    #[tokio::test]
    async fn unknown_course_is_not_found() {
        let storage = Storage::memory_only();
        let user = insert_user(&storage, "a@x.com", true).await;

        let err = InitiatePaymentService::new(
            storage,
            Arc::new(MockGateway::new()),
            Arc::new(FixedClock::default()),
        )
        .execute(user.id, "missing")
        .await
        .unwrap_err();

        assert_eq!(err, InitiatePaymentError::CourseNotFound);
    }
}
