use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifetime of an emailed verification token.
pub const VERIFICATION_TOKEN_TTL_HOURS: i64 = 24;

/// Unverified users idle for longer than this are force-verified by the admin sweep.
pub const INACTIVE_UNVERIFIED_AFTER_DAYS: i64 = 2;

pub fn verification_token_expiry(issued_at: DateTime<Utc>) -> DateTime<Utc> {
    issued_at + Duration::hours(VERIFICATION_TOKEN_TTL_HOURS)
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub is_verified: bool,
    pub is_admin: bool,
    /// SHA-256 hex of the active verification token. `None` once verified.
    pub verification_token_hash: Option<String>,
    pub verification_token_expires_at: Option<DateTime<Utc>>,
    pub last_activity: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            is_verified: self.is_verified,
            is_admin: self.is_admin,
        }
    }
}

/// Data needed to insert a user; the repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub is_admin: bool,
    pub is_verified: bool,
    pub verification_token_hash: Option<String>,
    pub verification_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user. Never carries token material.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: Uuid,
    #[schema(example = "a@x.com")]
    pub email: String,
    #[schema(example = "Ada")]
    pub name: String,
    pub is_verified: bool,
    pub is_admin: bool,
}

/// Exact-match privileged email allow-list; decides `is_admin` at signup.
#[derive(Debug, Clone, Default)]
pub struct AdminAllowList {
    emails: Vec<String>,
}

impl AdminAllowList {
    pub fn new(emails: Vec<String>) -> Self {
        Self { emails }
    }

    /// Parses a comma-separated list, ignoring blanks.
    pub fn parse(raw: &str) -> Self {
        Self::new(
            raw.split(',')
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn contains(&self, email: &str) -> bool {
        self.emails.iter().any(|e| e == email)
    }
}
