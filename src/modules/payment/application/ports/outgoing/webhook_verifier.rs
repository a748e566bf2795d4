/// Authenticity check for payment notifications. Implementations must
/// compare in constant time.
pub trait WebhookVerifier: Send + Sync {
    fn verify(&self, payload: &[u8], signature: &str) -> bool;
}
