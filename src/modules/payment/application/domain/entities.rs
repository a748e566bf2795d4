use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Result value the gateway sends for a captured payment.
pub const APPROVED_RESULT: &str = "approved";

/// Hosted checkout tickets stay valid this long.
pub const CHECKOUT_TICKET_TTL_HOURS: i64 = 24;

/// Everything the gateway needs to open a hosted checkout session.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub order_id: String,
    /// Decimal major units, see `amount::format_amount`.
    pub amount: String,
    pub description: String,
    pub customer_id: String,
    pub customer_email: String,
    pub expires_at: DateTime<Utc>,
}

/// Business fields of a payment notification. Only parsed after the
/// signature over the raw body has been checked. Declines may arrive
/// without a transaction or amount.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub order_id: String,
    pub result: String,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
}

impl WebhookPayload {
    pub fn is_approved(&self) -> bool {
        self.result.eq_ignore_ascii_case(APPROVED_RESULT)
    }
}
