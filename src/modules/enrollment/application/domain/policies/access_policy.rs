use chrono::{DateTime, Utc};

use crate::modules::enrollment::application::domain::entities::Enrollment;

/// Why a content request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenial {
    EmailNotVerified,
    NotEnrolled,
    AccessNotGranted,
    AccessExpired,
}

impl AccessDenial {
    /// User-facing reason, when the denial has one worth showing.
    pub fn reason(self) -> Option<&'static str> {
        match self {
            AccessDenial::EmailNotVerified => Some("Email not verified"),
            AccessDenial::AccessExpired => Some("Access expired"),
            AccessDenial::NotEnrolled | AccessDenial::AccessNotGranted => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    Denied(AccessDenial),
}

impl AccessDecision {
    pub fn is_granted(self) -> bool {
        matches!(self, AccessDecision::Granted)
    }
}

/// Access Evaluator. Pure: the caller supplies the latest enrollment and `now`.
///
/// An expiry at exactly `now` has already lapsed.
pub fn evaluate_access(enrollment: Option<&Enrollment>, now: DateTime<Utc>) -> AccessDecision {
    let Some(enrollment) = enrollment else {
        return AccessDecision::Denied(AccessDenial::NotEnrolled);
    };

    if !enrollment.has_access {
        return AccessDecision::Denied(AccessDenial::AccessNotGranted);
    }

    match enrollment.access_expires_at {
        Some(expires_at) if expires_at <= now => {
            AccessDecision::Denied(AccessDenial::AccessExpired)
        }
        _ => AccessDecision::Granted,
    }
}

/// Verified gate, evaluated before the Access Evaluator.
pub fn evaluate_content_access(
    user_is_verified: bool,
    enrollment: Option<&Enrollment>,
    now: DateTime<Utc>,
) -> AccessDecision {
    if !user_is_verified {
        return AccessDecision::Denied(AccessDenial::EmailNotVerified);
    }
    evaluate_access(enrollment, now)
}
