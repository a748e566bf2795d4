use async_trait::async_trait;
use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

use crate::modules::payment::application::domain::entities::PaymentRequest;
use crate::modules::payment::application::ports::outgoing::{PaymentGateway, PaymentGatewayError};

const SANDBOX_URL: &str = "https://esqa.moneris.com";
const PRODUCTION_URL: &str = "https://www3.moneris.com";
const PRELOAD_PATH: &str = "/gateway2/servlet/MpgRequest";
const REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentEnvironment {
    #[default]
    Sandbox,
    Production,
}

impl PaymentEnvironment {
    pub fn base_url(self) -> &'static str {
        match self {
            PaymentEnvironment::Sandbox => SANDBOX_URL,
            PaymentEnvironment::Production => PRODUCTION_URL,
        }
    }
}

impl FromStr for PaymentEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(PaymentEnvironment::Sandbox),
            "production" => Ok(PaymentEnvironment::Production),
            other => Err(format!(
                "unknown payment environment '{other}', expected 'sandbox' or 'production'"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HostedCheckoutConfig {
    pub store_id: String,
    pub api_token: String,
    pub environment: PaymentEnvironment,
}

/// Hosted checkout preload over form-encoded HTTP. The response is XML; only
/// the `<ticket>` element is read.
pub struct HostedCheckoutGateway {
    client: reqwest::Client,
    config: HostedCheckoutConfig,
}

impl HostedCheckoutGateway {
    pub fn new(config: HostedCheckoutConfig) -> Result<Self, PaymentGatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| PaymentGatewayError::Unavailable(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn form_fields(&self, request: &PaymentRequest) -> Vec<(&'static str, String)> {
        vec![
            ("store_id", self.config.store_id.clone()),
            ("api_token", self.config.api_token.clone()),
            ("order_id", request.order_id.clone()),
            ("amount", request.amount.clone()),
            ("description", request.description.clone()),
            ("cust_id", request.customer_id.clone()),
            ("email", request.customer_email.clone()),
            (
                "expiry_date",
                request.expires_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ),
        ]
    }
}

pub(crate) fn extract_ticket(body: &str) -> Option<&str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"<ticket>(.*?)</ticket>").expect("Invalid regex"));

    re.captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|ticket| !ticket.is_empty())
}

#[async_trait]
impl PaymentGateway for HostedCheckoutGateway {
    async fn preload(&self, request: PaymentRequest) -> Result<String, PaymentGatewayError> {
        let url = format!("{}{}", self.config.environment.base_url(), PRELOAD_PATH);
        let fields = self.form_fields(&request);

        let response = self
            .client
            .post(&url)
            .form(&fields)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| PaymentGatewayError::Unavailable(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| PaymentGatewayError::Unavailable(e.to_string()))?;

        extract_ticket(&body)
            .map(str::to_string)
            .ok_or_else(|| PaymentGatewayError::NoTicket(format!("order {}", request.order_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn reads_ticket_from_xml() {
        let body = "<response><ticket>ABC123</ticket><success>true</success></response>";
        assert_eq!(extract_ticket(body), Some("ABC123"));
    }

    #[test]
    fn missing_or_empty_ticket_is_none() {
        assert_eq!(extract_ticket("<response><error>bad</error></response>"), None);
        assert_eq!(extract_ticket("<ticket></ticket>"), None);
    }

    #[test]
    fn environment_selects_host() {
        assert_eq!(
            "production".parse::<PaymentEnvironment>().unwrap().base_url(),
            PRODUCTION_URL
        );
        assert_eq!(PaymentEnvironment::default().base_url(), SANDBOX_URL);
        assert!("staging".parse::<PaymentEnvironment>().is_err());
    }

    #[test]
    fn form_carries_customer_and_expiry() {
        let gateway = HostedCheckoutGateway::new(HostedCheckoutConfig {
            store_id: "store1".to_string(),
            api_token: "tok".to_string(),
            environment: PaymentEnvironment::Sandbox,
        })
        .unwrap();
        let request = PaymentRequest {
            order_id: "ord-1".to_string(),
            amount: "199.00".to_string(),
            description: "AI Coding Agents".to_string(),
            customer_id: "u1".to_string(),
            customer_email: "a@x.com".to_string(),
            expires_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        };

        let fields = gateway.form_fields(&request);

        assert!(fields.contains(&("store_id", "store1".to_string())));
        assert!(fields.contains(&("email", "a@x.com".to_string())));
        assert!(fields.contains(&("expiry_date", "2026-01-02 03:04:05".to_string())));
    }
}
