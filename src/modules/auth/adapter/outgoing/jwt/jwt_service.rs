use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;
use uuid::Uuid;

use crate::modules::auth::application::ports::outgoing::token_provider::{
    SessionClaims, SessionTokenError, SessionTokenProvider,
};

use super::jwt_config::JwtConfig;

/// HS256 bearer sessions.
#[derive(Clone)]
pub struct JwtSessionService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

#[cfg(not(tarpaulin_include))]
impl fmt::Debug for JwtSessionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSessionService")
            .field("session_ttl_secs", &self.config.session_ttl_secs)
            .finish()
    }
}

impl JwtSessionService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }
}

impl SessionTokenProvider for JwtSessionService {
    fn issue(&self, user_id: Uuid, is_admin: bool) -> Result<String, SessionTokenError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id,
            exp: (now + Duration::seconds(self.config.session_ttl_secs)).timestamp(),
            iat: now.timestamp(),
            is_admin,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| SessionTokenError::Encoding(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, SessionTokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 30;

        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|decoded| decoded.claims)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;

                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Session verification failed: expired");
                        SessionTokenError::Expired
                    }
                    ErrorKind::InvalidSignature => {
                        tracing::warn!("Security alert: invalid session signature");
                        SessionTokenError::InvalidSignature
                    }
                    _ => {
                        tracing::debug!(error = %e, "Session verification failed: malformed");
                        SessionTokenError::Malformed
                    }
                }
            })
    }
}
