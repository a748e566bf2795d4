use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::modules::auth::application::domain::entities::{User, VERIFICATION_TOKEN_TTL_HOURS};
use crate::modules::email::application::ports::outgoing::email_sender::EmailSender;
use crate::modules::email::application::ports::outgoing::user_email_notifier::{
    UserEmailNotificationError, UserEmailNotifier,
};

#[derive(Clone)]
pub struct UserEmailService {
    sender: Arc<dyn EmailSender>,
    base_url: String,
}

impl fmt::Debug for UserEmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserEmailService")
            .field("sender", &"<dyn EmailSender>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl UserEmailService {
    pub fn new(sender: Arc<dyn EmailSender>, base_url: impl Into<String>) -> Self {
        Self {
            sender,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn verification_link(&self, token: &str) -> String {
        format!("{}/api/auth/verify?token={}", self.base_url, token)
    }

    async fn deliver(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), UserEmailNotificationError> {
        self.sender.send_email(to, subject, body).await.map_err(|e| {
            tracing::error!(to, subject, error = %e, "Failed to send email");
            UserEmailNotificationError::EmailSendingFailed(e)
        })
    }
}

#[async_trait]
impl UserEmailNotifier for UserEmailService {
    async fn send_verification_email(
        &self,
        user: &User,
        token: &str,
    ) -> Result<(), UserEmailNotificationError> {
        let link = self.verification_link(token);
        let body = format!(
            r#"<h2>Welcome, {name}!</h2>
<p>Please confirm your email address to unlock your courses.</p>
<p><a href="{link}">Verify my email</a></p>
<p>This link expires in {ttl} hours. If you did not sign up, you can ignore this message.</p>"#,
            name = user.name,
            link = link,
            ttl = VERIFICATION_TOKEN_TTL_HOURS,
        );

        self.deliver(&user.email, "Verify your email", &body).await?;
        tracing::info!(user_id = %user.id, "Verification email sent");
        Ok(())
    }

    async fn send_welcome_email(&self, user: &User) -> Result<(), UserEmailNotificationError> {
        let body = format!(
            r#"<h2>You're verified, {name}!</h2>
<p>Your email address is confirmed and any courses you enrolled in are now unlocked.</p>
<p><a href="{base}">Start learning</a></p>"#,
            name = user.name,
            base = self.base_url,
        );

        self.deliver(&user.email, "Welcome aboard", &body).await?;
        tracing::info!(user_id = %user.id, "Welcome email sent");
        Ok(())
    }
}
