use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::enrollment::application::domain::entities::{
    Enrollment, NewEnrollment, PaymentRecord,
};
use crate::modules::enrollment::application::ports::outgoing::enrollment_repository::{
    EnrollmentRepository, EnrollmentRepositoryError,
};

#[derive(Clone, Debug, Default)]
pub struct EnrollmentRepositoryMemory {
    enrollments: Arc<DashMap<Uuid, Enrollment>>,
    by_user_course: Arc<DashMap<(Uuid, String), Uuid>>,
}

impl EnrollmentRepositoryMemory {
    pub fn new() -> Self {
        Self::default()
    }

    fn update<F>(&self, enrollment_id: Uuid, apply: F) -> Result<Enrollment, EnrollmentRepositoryError>
    where
        F: FnOnce(&mut Enrollment),
    {
        let mut entry = self
            .enrollments
            .get_mut(&enrollment_id)
            .ok_or(EnrollmentRepositoryError::NotFound)?;
        apply(entry.value_mut());
        Ok(entry.value().clone())
    }
}

#[async_trait]
impl EnrollmentRepository for EnrollmentRepositoryMemory {
    async fn create_enrollment(
        &self,
        enrollment: NewEnrollment,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        let key = (enrollment.user_id, enrollment.course_id.clone());
        match self.by_user_course.entry(key) {
            Entry::Occupied(_) => Err(EnrollmentRepositoryError::AlreadyEnrolled),
            Entry::Vacant(slot) => {
                let created = Enrollment {
                    id: Uuid::new_v4(),
                    user_id: enrollment.user_id,
                    course_id: enrollment.course_id,
                    has_access: enrollment.has_access,
                    enrolled_at: enrollment.enrolled_at,
                    completed_at: None,
                    access_expires_at: None,
                    payment_id: None,
                    paid_amount: None,
                };
                self.enrollments.insert(created.id, created.clone());
                slot.insert(created.id);
                Ok(created)
            }
        }
    }

    async fn find_by_id(
        &self,
        enrollment_id: Uuid,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        Ok(self.enrollments.get(&enrollment_id).map(|e| e.value().clone()))
    }

    async fn find_by_user_and_course(
        &self,
        user_id: Uuid,
        course_id: &str,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        let key = (user_id, course_id.to_string());
        let Some(id) = self.by_user_course.get(&key).map(|e| *e.value()) else {
            return Ok(None);
        };
        Ok(self.enrollments.get(&id).map(|e| e.value().clone()))
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        let mut found: Vec<Enrollment> = self
            .enrollments
            .iter()
            .filter(|e| e.user_id == user_id)
            .map(|e| e.value().clone())
            .collect();
        found.sort_by(|a, b| b.enrolled_at.cmp(&a.enrolled_at));
        Ok(found)
    }

    async fn grant_access(&self, enrollment_id: Uuid) -> Result<(), EnrollmentRepositoryError> {
        self.update(enrollment_id, |e| e.has_access = true)?;
        Ok(())
    }

    async fn grant_access_for_user(&self, user_id: Uuid) -> Result<u64, EnrollmentRepositoryError> {
        let mut granted = 0;
        for mut entry in self.enrollments.iter_mut() {
            if entry.user_id == user_id && !entry.has_access {
                entry.has_access = true;
                granted += 1;
            }
        }
        Ok(granted)
    }

    async fn record_payment(
        &self,
        enrollment_id: Uuid,
        payment_id: String,
        paid_amount: i64,
    ) -> Result<PaymentRecord, EnrollmentRepositoryError> {
        let mut entry = self
            .enrollments
            .get_mut(&enrollment_id)
            .ok_or(EnrollmentRepositoryError::NotFound)?;

        let enrollment = entry.value_mut();
        if enrollment.payment_id.is_some() {
            return Ok(PaymentRecord::AlreadyRecorded(enrollment.clone()));
        }

        enrollment.has_access = true;
        enrollment.payment_id = Some(payment_id);
        enrollment.paid_amount = Some(paid_amount);
        Ok(PaymentRecord::Recorded(enrollment.clone()))
    }

    async fn mark_completed(
        &self,
        enrollment_id: Uuid,
        completed_at: DateTime<Utc>,
        access_expires_at: DateTime<Utc>,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        self.update(enrollment_id, |e| {
            e.completed_at = Some(completed_at);
            e.access_expires_at = Some(access_expires_at);
        })
    }
}
