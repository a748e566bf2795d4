use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtSessionService};

pub const TEST_SESSION_SECRET: &str = "test_secret_key_for_testing_only_0123456789";

pub fn create_test_session_service() -> JwtSessionService {
    JwtSessionService::new(JwtConfig::new(TEST_SESSION_SECRET, 3600))
}
