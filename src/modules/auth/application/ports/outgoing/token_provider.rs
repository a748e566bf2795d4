use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionTokenError {
    #[error("Session has expired")]
    Expired,

    #[error("Invalid session signature")]
    InvalidSignature,

    #[error("Malformed session token")]
    Malformed,

    #[error("Session encoding error: {0}")]
    Encoding(String),
}

/// Claims of a signed session token.
///
/// `is_admin` is fixed when the account is created, so it is safe to carry in
/// the token. Verification status is not: it changes and is always read from
/// the Identity Store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
    pub is_admin: bool,
}

pub trait SessionTokenProvider: Send + Sync {
    fn issue(&self, user_id: Uuid, is_admin: bool) -> Result<String, SessionTokenError>;
    fn verify(&self, token: &str) -> Result<SessionClaims, SessionTokenError>;
}
