pub mod hmac_webhook_verifier;
pub mod hosted_checkout_gateway;

pub use hmac_webhook_verifier::HmacWebhookVerifier;
pub use hosted_checkout_gateway::{HostedCheckoutConfig, HostedCheckoutGateway, PaymentEnvironment};
