use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::enrollment::application::domain::entities::{Enrollment, NewEnrollment};
use crate::modules::enrollment::application::domain::policies::evaluate_access;
use crate::modules::enrollment::application::ports::incoming::use_cases::enroll::{
    EnrollError, EnrollOutput, EnrollUseCase,
};
use crate::modules::enrollment::application::ports::outgoing::EnrollmentRepositoryError;
use crate::shared::clock::Clock;
use crate::shared::storage::{Storage, StoreHandle};

/// Free courses need a verified user and unlock immediately. Paid courses
/// are enrolled locked until a payment is confirmed.
pub struct EnrollService {
    storage: Storage,
    clock: Arc<dyn Clock>,
}

impl EnrollService {
    pub fn new(storage: Storage, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// Inserts the enrollment, or returns the one a concurrent request
    /// created first.
    async fn create_or_existing(
        &self,
        store: &StoreHandle,
        enrollment: NewEnrollment,
    ) -> Result<Enrollment, EnrollError> {
        let user_id = enrollment.user_id;
        let course_id = enrollment.course_id.clone();

        match store.enrollments.create_enrollment(enrollment).await {
            Ok(created) => Ok(created),
            Err(EnrollmentRepositoryError::AlreadyEnrolled) => store
                .enrollments
                .find_by_user_and_course(user_id, &course_id)
                .await
                .map_err(|e| EnrollError::RepositoryError(e.to_string()))?
                .ok_or_else(|| {
                    EnrollError::RepositoryError("enrollment vanished after conflict".to_string())
                }),
            Err(e) => Err(EnrollError::RepositoryError(e.to_string())),
        }
    }
}

#[async_trait]
impl EnrollUseCase for EnrollService {
    async fn execute(&self, user_id: Uuid, course_id: &str) -> Result<EnrollOutput, EnrollError> {
        let store = self.storage.resolve();
        let now = self.clock.now();

        let course = store
            .courses
            .find_by_id(course_id)
            .await
            .map_err(|e| EnrollError::RepositoryError(e.to_string()))?
            .ok_or(EnrollError::CourseNotFound)?;

        let user = store
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| EnrollError::RepositoryError(e.to_string()))?
            .ok_or(EnrollError::UserNotFound)?;

        let existing = store
            .enrollments
            .find_by_user_and_course(user_id, &course.id)
            .await
            .map_err(|e| EnrollError::RepositoryError(e.to_string()))?;

        if course.is_free() {
            if !user.is_verified {
                return Err(EnrollError::VerificationRequired);
            }

            let enrollment = match existing {
                Some(enrollment) if enrollment.has_access => enrollment,
                Some(enrollment) => {
                    store
                        .enrollments
                        .grant_access(enrollment.id)
                        .await
                        .map_err(|e| EnrollError::RepositoryError(e.to_string()))?;
                    Enrollment {
                        has_access: true,
                        ..enrollment
                    }
                }
                None => {
                    self.create_or_existing(
                        &store,
                        NewEnrollment {
                            user_id,
                            course_id: course.id.clone(),
                            has_access: true,
                            enrolled_at: now,
                        },
                    )
                    .await?
                }
            };

            tracing::info!(user_id = %user_id, course_id = %course.id, enrollment_id = %enrollment.id, "Enrolled in free course");
            return Ok(EnrollOutput {
                enrollment,
                requires_payment: false,
                price: None,
            });
        }

        let enrollment = match existing {
            Some(enrollment) => enrollment,
            None => {
                self.create_or_existing(
                    &store,
                    NewEnrollment {
                        user_id,
                        course_id: course.id.clone(),
                        has_access: false,
                        enrolled_at: now,
                    },
                )
                .await?
            }
        };

        let requires_payment = !evaluate_access(Some(&enrollment), now).is_granted();
        tracing::info!(
            user_id = %user_id,
            course_id = %course.id,
            enrollment_id = %enrollment.id,
            requires_payment,
            "Enrolled in paid course"
        );

        Ok(EnrollOutput {
            enrollment,
            requires_payment,
            price: Some(course.price),
        })
    }
}
