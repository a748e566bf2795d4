use data_encoding::HEXLOWER_PERMISSIVE;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::modules::payment::application::ports::outgoing::WebhookVerifier;

type HmacSha256 = Hmac<Sha256>;

/// Hex HMAC-SHA256 over the raw request body.
pub struct HmacWebhookVerifier {
    secret: Vec<u8>,
}

impl HmacWebhookVerifier {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    fn mac(&self, payload: &[u8]) -> Option<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(&self.secret).ok()?;
        mac.update(payload);
        Some(mac)
    }

    /// Lowercase hex signature, as the gateway sends it.
    pub fn sign(&self, payload: &[u8]) -> String {
        self.mac(payload)
            .map(|mac| HEXLOWER_PERMISSIVE.encode(&mac.finalize().into_bytes()))
            .unwrap_or_default()
    }
}

impl WebhookVerifier for HmacWebhookVerifier {
    fn verify(&self, payload: &[u8], signature: &str) -> bool {
        let Ok(expected) = HEXLOWER_PERMISSIVE.decode(signature.as_bytes()) else {
            return false;
        };
        let Some(mac) = self.mac(payload) else {
            return false;
        };
        mac.verify_slice(&expected).is_ok()
    }
}
