use async_trait::async_trait;

use crate::modules::email::application::ports::outgoing::email_sender::EmailSender;

/// Stand-in when no SMTP relay is configured. Every send fails, which the
/// signup flow reports as "email delivery unavailable".
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledEmailSender;

#[async_trait]
impl EmailSender for DisabledEmailSender {
    async fn send_email(&self, to: &str, _subject: &str, _body: &str) -> Result<(), String> {
        tracing::warn!(to, "Email delivery is not configured; message dropped");
        Err("email delivery is not configured".to_string())
    }
}
