use std::env;
use std::time::Duration;

use crate::modules::auth::application::domain::entities::AdminAllowList;
use crate::modules::enrollment::application::domain::policies::CompletionPolicy;
use crate::modules::payment::adapter::outgoing::{HostedCheckoutConfig, PaymentEnvironment};

const MIN_SESSION_SECRET_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub server: String,
    pub username: String,
    pub password: String,
    pub from_email: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub db_probe_interval: Duration,
    pub session_secret: String,
    pub session_ttl_secs: i64,
    pub admin_emails: AdminAllowList,
    pub base_url: String,
    /// `None` leaves email delivery unavailable.
    pub smtp: Option<SmtpConfig>,
    pub checkout: HostedCheckoutConfig,
    pub webhook_secret: String,
    pub completion_policy: CompletionPolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let session_secret = get("SESSION_SECRET").ok_or(ConfigError::Missing("SESSION_SECRET"))?;
        if session_secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(ConfigError::Invalid {
                name: "SESSION_SECRET",
                reason: format!("must be at least {MIN_SESSION_SECRET_LEN} characters"),
            });
        }

        let webhook_secret =
            get("PAYMENT_WEBHOOK_SECRET").ok_or(ConfigError::Missing("PAYMENT_WEBHOOK_SECRET"))?;

        let port = parse_or("PORT", get("PORT"), 8080u16)?;
        let probe_secs = parse_or("DB_PROBE_INTERVAL_SECS", get("DB_PROBE_INTERVAL_SECS"), 5u64)?;
        let session_ttl_secs = parse_or("SESSION_TTL_SECS", get("SESSION_TTL_SECS"), 86_400i64)?;
        if session_ttl_secs <= 0 {
            return Err(ConfigError::Invalid {
                name: "SESSION_TTL_SECS",
                reason: "must be positive".to_string(),
            });
        }

        let environment = match get("PAYMENT_ENVIRONMENT") {
            Some(raw) => raw
                .parse::<PaymentEnvironment>()
                .map_err(|reason| ConfigError::Invalid {
                    name: "PAYMENT_ENVIRONMENT",
                    reason,
                })?,
            None => PaymentEnvironment::default(),
        };

        let completion_policy = match get("COMPLETION_POLICY") {
            Some(raw) => raw
                .parse::<CompletionPolicy>()
                .map_err(|reason| ConfigError::Invalid {
                    name: "COMPLETION_POLICY",
                    reason,
                })?,
            None => CompletionPolicy::default(),
        };

        let smtp = match (
            get("SMTP_SERVER"),
            get("SMTP_USERNAME"),
            get("SMTP_PASSWORD"),
            get("EMAIL_FROM"),
        ) {
            (Some(server), Some(username), Some(password), Some(from_email)) => Some(SmtpConfig {
                server,
                username,
                password,
                from_email,
            }),
            _ => None,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            database_url: get("DATABASE_URL"),
            db_probe_interval: Duration::from_secs(probe_secs.max(1)),
            session_secret,
            session_ttl_secs,
            admin_emails: AdminAllowList::parse(&get("ADMIN_EMAILS").unwrap_or_default()),
            base_url: get("BASE_URL")
                .unwrap_or_else(|| "http://localhost:8080".to_string())
                .trim_end_matches('/')
                .to_string(),
            smtp,
            checkout: HostedCheckoutConfig {
                store_id: get("PAYMENT_STORE_ID").unwrap_or_default(),
                api_token: get("PAYMENT_API_TOKEN").unwrap_or_default(),
                environment,
            },
            webhook_secret,
            completion_policy,
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(v) => v.parse::<T>().map_err(|e| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
