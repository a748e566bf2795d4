use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::enrollment::application::domain::entities::PaymentRecord;
use crate::modules::enrollment::application::ports::outgoing::EnrollmentRepositoryError;
use crate::modules::payment::application::domain::amount::parse_amount;
use crate::modules::payment::application::domain::entities::WebhookPayload;
use crate::modules::payment::application::domain::order_reference::OrderReference;
use crate::modules::payment::application::ports::incoming::use_cases::confirm_payment::{
    ConfirmPaymentError, ConfirmPaymentOutcome, ConfirmPaymentUseCase,
};
use crate::modules::payment::application::ports::outgoing::WebhookVerifier;
use crate::shared::storage::Storage;

pub struct ConfirmPaymentService {
    storage: Storage,
    verifier: Arc<dyn WebhookVerifier>,
}

impl ConfirmPaymentService {
    pub fn new(storage: Storage, verifier: Arc<dyn WebhookVerifier>) -> Self {
        Self { storage, verifier }
    }
}

#[async_trait]
impl ConfirmPaymentUseCase for ConfirmPaymentService {
    async fn execute(
        &self,
        raw_body: &[u8],
        signature: Option<&str>,
    ) -> Result<ConfirmPaymentOutcome, ConfirmPaymentError> {
        let authentic = signature
            .map(|sig| self.verifier.verify(raw_body, sig.trim()))
            .unwrap_or(false);
        if !authentic {
            return Err(ConfirmPaymentError::InvalidSignature);
        }

        let payload: WebhookPayload = serde_json::from_slice(raw_body)
            .map_err(|e| ConfirmPaymentError::MalformedPayload(e.to_string()))?;

        if !payload.is_approved() {
            tracing::info!(order_id = %payload.order_id, result = %payload.result, "Payment not approved");
            return Ok(ConfirmPaymentOutcome::NotApproved);
        }

        let transaction_id = payload
            .transaction_id
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ConfirmPaymentError::MalformedPayload("missing transactionId".to_string())
            })?
            .to_string();
        let raw_amount = payload.amount.as_deref().unwrap_or_default();
        let paid_amount = parse_amount(raw_amount).ok_or_else(|| {
            ConfirmPaymentError::MalformedPayload(format!("invalid amount '{raw_amount}'"))
        })?;

        let Some(reference) = OrderReference::parse(&payload.order_id) else {
            tracing::warn!(order_id = %payload.order_id, "Webhook for unrecognised order id");
            return Ok(ConfirmPaymentOutcome::UnknownOrder);
        };

        let store = self.storage.resolve();
        let enrollment = store
            .enrollments
            .find_by_id(reference.enrollment_id)
            .await
            .map_err(|e| ConfirmPaymentError::RepositoryError(e.to_string()))?;
        let Some(enrollment) = enrollment else {
            tracing::warn!(order_id = %payload.order_id, "Webhook order has no enrollment");
            return Ok(ConfirmPaymentOutcome::UnknownOrder);
        };

        let course = store
            .courses
            .find_by_id(&enrollment.course_id)
            .await
            .map_err(|e| ConfirmPaymentError::RepositoryError(e.to_string()))?;
        if let Some(course) = course.filter(|c| c.price != paid_amount) {
            tracing::warn!(
                enrollment_id = %enrollment.id,
                course_id = %course.id,
                expected = course.price,
                paid = paid_amount,
                "Paid amount differs from course price"
            );
        }

        let record = store
            .enrollments
            .record_payment(reference.enrollment_id, transaction_id.clone(), paid_amount)
            .await;

        match record {
            Ok(PaymentRecord::Recorded(enrollment)) => {
                tracing::info!(
                    enrollment_id = %enrollment.id,
                    user_id = %enrollment.user_id,
                    course_id = %enrollment.course_id,
                    transaction_id = %transaction_id,
                    "Payment confirmed, access granted"
                );
                Ok(ConfirmPaymentOutcome::Granted)
            }
            Ok(PaymentRecord::AlreadyRecorded(enrollment)) => {
                if enrollment.payment_id.as_deref() != Some(transaction_id.as_str()) {
                    tracing::warn!(
                        enrollment_id = %enrollment.id,
                        transaction_id = %transaction_id,
                        "Second transaction for an already paid enrollment"
                    );
                }
                Ok(ConfirmPaymentOutcome::Duplicate)
            }
            Err(EnrollmentRepositoryError::NotFound) => {
                tracing::warn!(order_id = %payload.order_id, "Webhook order has no enrollment");
                Ok(ConfirmPaymentOutcome::UnknownOrder)
            }
            Err(e) => Err(ConfirmPaymentError::RepositoryError(e.to_string())),
        }
    }
}
