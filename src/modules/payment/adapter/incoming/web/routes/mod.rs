mod initiate_payment;
mod payment_webhook;

pub use initiate_payment::{initiate_payment_handler, InitiatePaymentRequestDto};
pub use payment_webhook::{payment_webhook_handler, WebhookAck, SIGNATURE_HEADER};

pub use initiate_payment::__path_initiate_payment_handler;
pub use payment_webhook::__path_payment_webhook_handler;
