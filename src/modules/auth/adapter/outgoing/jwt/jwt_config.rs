/// Minimum HS256 secret length.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub session_ttl_secs: i64,
}

impl JwtConfig {
    pub fn new(secret_key: impl Into<String>, session_ttl_secs: i64) -> Self {
        Self {
            secret_key: secret_key.into(),
            session_ttl_secs,
        }
    }
}
