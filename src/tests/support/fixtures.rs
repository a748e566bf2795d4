use chrono::Duration;

use crate::auth::application::domain::entities::{NewUser, User};
use crate::auth::application::services::verification::hash_token;
use crate::shared::clock::Clock;
use crate::shared::storage::Storage;
use crate::tests::support::clock::FixedClock;

/// Token whose hash is stored on unverified fixture users.
const FIXTURE_TOKEN: &str = "fixture-token";

/// Inserts a non-admin user directly into the active backend, stamped at the
/// default [`FixedClock`] instant. Unverified users carry a live token.
pub async fn insert_user(storage: &Storage, email: &str, verified: bool) -> User {
    let now = FixedClock::default().now();
    storage
        .resolve()
        .users
        .create_user(NewUser {
            email: email.to_string(),
            name: email.split('@').next().unwrap_or(email).to_string(),
            is_admin: false,
            is_verified: verified,
            verification_token_hash: (!verified).then(|| hash_token(FIXTURE_TOKEN)),
            verification_token_expires_at: (!verified).then(|| now + Duration::hours(24)),
            created_at: now,
        })
        .await
        .expect("insert fixture user")
}
