use async_trait::async_trait;
use std::sync::Mutex;

use crate::auth::application::domain::entities::User;
use crate::email::application::ports::outgoing::user_email_notifier::{
    UserEmailNotificationError, UserEmailNotifier,
};
use crate::payment::application::domain::entities::PaymentRequest;
use crate::payment::application::ports::outgoing::{PaymentGateway, PaymentGatewayError};

/// Keeps every verification token it is asked to send, keyed by recipient.
#[derive(Default)]
pub struct RecordingNotifier {
    fail: bool,
    tokens: Mutex<Vec<(String, String)>>,
    welcomes: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Every send reports a delivery failure.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn last_token_for(&self, email: &str) -> Option<String> {
        self.tokens
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, token)| token.clone())
    }

    pub fn welcome_count(&self) -> usize {
        self.welcomes.lock().unwrap().len()
    }
}

#[async_trait]
impl UserEmailNotifier for RecordingNotifier {
    async fn send_verification_email(
        &self,
        user: &User,
        token: &str,
    ) -> Result<(), UserEmailNotificationError> {
        if self.fail {
            return Err(UserEmailNotificationError::EmailSendingFailed(
                "smtp down".to_string(),
            ));
        }
        self.tokens
            .lock()
            .unwrap()
            .push((user.email.clone(), token.to_string()));
        Ok(())
    }

    async fn send_welcome_email(&self, user: &User) -> Result<(), UserEmailNotificationError> {
        if self.fail {
            return Err(UserEmailNotificationError::EmailSendingFailed(
                "smtp down".to_string(),
            ));
        }
        self.welcomes.lock().unwrap().push(user.email.clone());
        Ok(())
    }
}

pub struct StubPaymentGateway {
    outcome: Result<String, PaymentGatewayError>,
}

impl StubPaymentGateway {
    pub const TICKET: &'static str = "ticket-1700000000abc";

    pub fn failing(error: PaymentGatewayError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

impl Default for StubPaymentGateway {
    fn default() -> Self {
        Self {
            outcome: Ok(Self::TICKET.to_string()),
        }
    }
}

#[async_trait]
impl PaymentGateway for StubPaymentGateway {
    async fn preload(&self, _request: PaymentRequest) -> Result<String, PaymentGatewayError> {
        self.outcome.clone()
    }
}
