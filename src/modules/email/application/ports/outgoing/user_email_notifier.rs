use crate::modules::auth::application::domain::entities::User;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UserEmailNotificationError {
    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),
}

/// Delivers the account lifecycle mails. Failures are reported, never retried.
#[async_trait::async_trait]
pub trait UserEmailNotifier: Send + Sync {
    async fn send_verification_email(
        &self,
        user: &User,
        token: &str,
    ) -> Result<(), UserEmailNotificationError>;

    async fn send_welcome_email(&self, user: &User) -> Result<(), UserEmailNotificationError>;
}
