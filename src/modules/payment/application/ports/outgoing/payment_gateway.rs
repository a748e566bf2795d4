use async_trait::async_trait;

use crate::modules::payment::application::domain::entities::PaymentRequest;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaymentGatewayError {
    #[error("Payment gateway unavailable: {0}")]
    Unavailable(String),

    #[error("Payment gateway did not issue a ticket: {0}")]
    NoTicket(String),
}

/// Hosted checkout provider. `preload` opens a checkout session and returns
/// its opaque ticket.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn preload(&self, request: PaymentRequest) -> Result<String, PaymentGatewayError>;
}
