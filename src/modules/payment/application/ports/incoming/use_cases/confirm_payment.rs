use async_trait::async_trait;

/// What an authentic notification did. Every variant is acknowledged to the
/// gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmPaymentOutcome {
    /// Access granted and the payment recorded.
    Granted,
    /// A payment was already on file; nothing changed.
    Duplicate,
    /// Not an approved result; nothing changed.
    NotApproved,
    /// The order does not resolve to an enrollment; nothing changed.
    UnknownOrder,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfirmPaymentError {
    #[error("Invalid webhook signature")]
    InvalidSignature,
    #[error("Malformed webhook payload: {0}")]
    MalformedPayload(String),
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Handles a payment notification. The signature over the raw body is
/// checked before any field is read; redelivery of the same notification
/// is a no-op.
#[async_trait]
pub trait ConfirmPaymentUseCase: Send + Sync {
    async fn execute(
        &self,
        raw_body: &[u8],
        signature: Option<&str>,
    ) -> Result<ConfirmPaymentOutcome, ConfirmPaymentError>;
}
