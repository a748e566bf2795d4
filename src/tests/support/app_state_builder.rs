use actix_web::web;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::adapter::outgoing::jwt::JwtSessionService;
use crate::auth::application::domain::entities::{AdminAllowList, NewUser, User};
use crate::auth::application::ports::incoming::use_cases::SignupInput;
use crate::auth::application::ports::outgoing::SessionTokenProvider;
use crate::enrollment::application::domain::entities::Enrollment;
use crate::enrollment::application::domain::policies::CompletionPolicy;
use crate::payment::adapter::outgoing::HmacWebhookVerifier;
use crate::payment::application::ports::outgoing::PaymentGateway;
use crate::shared::clock::Clock;
use crate::shared::storage::Storage;
use crate::tests::support::auth_helper::create_test_session_service;
use crate::tests::support::clock::FixedClock;
use crate::tests::support::fixtures::insert_user;
use crate::tests::support::stubs::{RecordingNotifier, StubPaymentGateway};
use crate::{build_app_state, AppDependencies, AppState};

pub const TEST_WEBHOOK_SECRET: &str = "test-webhook-secret";

pub struct TestAppStateBuilder {
    storage: Storage,
    notifier: Arc<RecordingNotifier>,
    gateway: Arc<dyn PaymentGateway>,
    completion_policy: CompletionPolicy,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            storage: Storage::memory_only(),
            notifier: Arc::new(RecordingNotifier::default()),
            gateway: Arc::new(StubPaymentGateway::default()),
            completion_policy: CompletionPolicy::default(),
        }
    }
}

impl TestAppStateBuilder {
    /// Only entry on the admin allow-list.
    pub const ADMIN_EMAIL: &'static str = "admin@school.io";

    pub fn with_storage(mut self, storage: Storage) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<RecordingNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_gateway(mut self, gateway: Arc<dyn PaymentGateway>) -> Self {
        self.gateway = gateway;
        self
    }

    pub fn with_completion_policy(mut self, policy: CompletionPolicy) -> Self {
        self.completion_policy = policy;
        self
    }

    pub fn build(self) -> TestApp {
        let clock = Arc::new(FixedClock::default());
        let sessions = Arc::new(create_test_session_service());

        let state = build_app_state(AppDependencies {
            storage: self.storage.clone(),
            sessions: sessions.clone(),
            notifier: self.notifier.clone(),
            gateway: self.gateway,
            verifier: Arc::new(HmacWebhookVerifier::new(TEST_WEBHOOK_SECRET)),
            clock: clock.clone(),
            admins: AdminAllowList::new(vec![Self::ADMIN_EMAIL.to_string()]),
            completion_policy: self.completion_policy,
        });

        TestApp {
            state: web::Data::new(state),
            storage: self.storage,
            clock,
            notifier: self.notifier,
            sessions,
            verifier: HmacWebhookVerifier::new(TEST_WEBHOOK_SECRET),
        }
    }
}

/// Fully wired state over in-memory storage plus handles on its collaborators.
pub struct TestApp {
    pub state: web::Data<AppState>,
    pub storage: Storage,
    pub clock: Arc<FixedClock>,
    pub notifier: Arc<RecordingNotifier>,
    pub sessions: Arc<JwtSessionService>,
    verifier: HmacWebhookVerifier,
}

impl TestApp {
    /// `Authorization` header carrying a fresh session for the user.
    pub fn bearer(&self, user_id: Uuid, is_admin: bool) -> (&'static str, String) {
        let token = self.sessions.issue(user_id, is_admin).unwrap();
        ("Authorization", format!("Bearer {token}"))
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub async fn create_user(&self, email: &str, verified: bool) -> User {
        insert_user(&self.storage, email, verified).await
    }

    pub async fn create_admin(&self) -> User {
        let now = self.now();
        self.storage
            .resolve()
            .users
            .create_user(NewUser {
                email: TestAppStateBuilder::ADMIN_EMAIL.to_string(),
                name: "Admin".to_string(),
                is_admin: true,
                is_verified: true,
                verification_token_hash: None,
                verification_token_expires_at: None,
                created_at: now,
            })
            .await
            .unwrap()
    }

    /// Signs up through the use case and returns the mailed verification token.
    pub async fn signup(&self, email: &str) -> String {
        self.state
            .auth
            .signup
            .execute(SignupInput {
                email: email.to_string(),
                name: "Test User".to_string(),
            })
            .await
            .unwrap();
        self.notifier
            .last_token_for(email)
            .expect("verification token mailed")
    }

    pub async fn find_user(&self, email: &str) -> User {
        self.storage
            .resolve()
            .users
            .find_by_email(email)
            .await
            .unwrap()
            .expect("user exists")
    }

    pub async fn enroll(&self, user_id: Uuid, course_id: &str) -> Enrollment {
        self.state
            .enrollment
            .enroll
            .execute(user_id, course_id)
            .await
            .unwrap()
            .enrollment
    }

    pub async fn enrollment(&self, enrollment_id: Uuid) -> Enrollment {
        self.storage
            .resolve()
            .enrollments
            .find_by_id(enrollment_id)
            .await
            .unwrap()
            .expect("enrollment exists")
    }

    pub fn sign_webhook(&self, payload: &[u8]) -> String {
        self.verifier.sign(payload)
    }
}
