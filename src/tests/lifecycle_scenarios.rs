//! End-to-end lifecycle properties, run through the wired use cases on the
//! in-memory backend.

use chrono::Duration;

use crate::auth::application::ports::incoming::use_cases::{SignupInput, VerifyEmailError};
use crate::enrollment::application::domain::entities::{
    NewEnrollment, ACCESS_DAYS_AFTER_COMPLETION,
};
use crate::enrollment::application::ports::incoming::use_cases::EnrollError;
use crate::payment::application::domain::order_reference::OrderReference;
use crate::payment::application::ports::incoming::use_cases::ConfirmPaymentOutcome;
use crate::tests::support::app_state_builder::{TestApp, TestAppStateBuilder};

async fn has_access(app: &TestApp, user_id: uuid::Uuid, course_id: &str) -> bool {
    app.state
        .enrollment
        .check_access
        .execute(user_id, course_id)
        .await
        .unwrap()
        .has_access
}

#[actix_web::test]
async fn unverified_users_always_hold_a_live_token() {
    let app = TestAppStateBuilder::default().build();
    app.signup("a@x.com").await;
    app.state
        .auth
        .signup
        .execute(SignupInput {
            email: TestAppStateBuilder::ADMIN_EMAIL.to_string(),
            name: "Root".to_string(),
        })
        .await
        .unwrap();

    let user = app.find_user("a@x.com").await;
    assert!(!user.is_verified);
    assert!(user.verification_token_hash.is_some());
    assert!(user.verification_token_expires_at.unwrap() > app.now());

    let admin = app.find_user(TestAppStateBuilder::ADMIN_EMAIL).await;
    assert!(admin.is_verified);
    assert!(admin.is_admin);
    assert!(admin.verification_token_hash.is_none());
}

#[actix_web::test]
async fn verifying_twice_with_the_same_token_fails_the_second_time() {
    let app = TestAppStateBuilder::default().build();
    let token = app.signup("a@x.com").await;

    let profile = app.state.auth.verify_email.execute(&token).await.unwrap();
    assert!(profile.is_verified);

    let err = app.state.auth.verify_email.execute(&token).await.unwrap_err();
    assert_eq!(err, VerifyEmailError::InvalidOrExpiredToken);
    assert!(app.find_user("a@x.com").await.is_verified);
}

#[actix_web::test]
async fn resend_invalidates_the_previous_token() {
    let app = TestAppStateBuilder::default().build();
    let original = app.signup("a@x.com").await;
    let user = app.find_user("a@x.com").await;

    app.state
        .auth
        .resend_verification
        .execute(user.id)
        .await
        .unwrap();
    let replacement = app.notifier.last_token_for("a@x.com").unwrap();
    assert_ne!(original, replacement);

    assert_eq!(
        app.state.auth.verify_email.execute(&original).await.unwrap_err(),
        VerifyEmailError::InvalidOrExpiredToken
    );
    assert!(app.state.auth.verify_email.execute(&replacement).await.is_ok());
}

#[actix_web::test]
async fn free_enrollment_is_gated_on_verification() {
    let app = TestAppStateBuilder::default().build();
    let token = app.signup("a@x.com").await;
    let user = app.find_user("a@x.com").await;

    let err = app
        .state
        .enrollment
        .enroll
        .execute(user.id, "security-testing")
        .await
        .unwrap_err();
    assert_eq!(err, EnrollError::VerificationRequired);

    app.state.auth.verify_email.execute(&token).await.unwrap();
    let enrollment = app.enroll(user.id, "security-testing").await;

    assert!(enrollment.has_access);
    assert!(has_access(&app, user.id, "security-testing").await);
}

#[actix_web::test]
async fn unverified_user_enrolling_in_a_paid_course_owes_the_price() {
    let app = TestAppStateBuilder::default().build();
    app.signup("b@x.com").await;
    let user = app.find_user("b@x.com").await;

    let output = app
        .state
        .enrollment
        .enroll
        .execute(user.id, "ai-agents")
        .await
        .unwrap();

    assert!(!output.enrollment.has_access);
    assert!(output.requires_payment);
    assert_eq!(output.price, Some(19900));
    assert!(!has_access(&app, user.id, "ai-agents").await);
}

#[actix_web::test]
async fn completion_opens_a_ten_day_window_then_access_lapses() {
    let app = TestAppStateBuilder::default().build();
    let user = app.create_user("a@x.com", true).await;
    let enrollment = app.enroll(user.id, "security-testing").await;
    let t0 = app.now();

    let completed = app
        .state
        .enrollment
        .complete_course
        .execute(user.id, enrollment.id)
        .await
        .unwrap();
    assert_eq!(completed.completed_at, t0);
    assert_eq!(
        completed.access_expires_at,
        t0 + Duration::days(ACCESS_DAYS_AFTER_COMPLETION)
    );

    let stored = app.enrollment(enrollment.id).await;
    assert_eq!(
        stored.access_expires_at,
        stored.completed_at.map(|c| c + Duration::days(10))
    );

    app.clock.advance(Duration::days(9));
    assert!(has_access(&app, user.id, "security-testing").await);

    app.clock.advance(Duration::days(2));
    assert!(app.enrollment(enrollment.id).await.has_access);
    assert!(!has_access(&app, user.id, "security-testing").await);
}

#[actix_web::test]
async fn enrollments_without_completion_carry_no_expiry() {
    let app = TestAppStateBuilder::default().build();
    let user = app.create_user("a@x.com", true).await;
    let enrollment = app.enroll(user.id, "security-testing").await;

    assert_eq!(enrollment.completed_at, None);
    assert_eq!(enrollment.access_expires_at, None);
}

#[actix_web::test]
async fn redelivered_payment_grants_once() {
    let app = TestAppStateBuilder::default().build();
    let user = app.create_user("b@x.com", true).await;
    let initiated = app
        .state
        .payment
        .initiate
        .execute(user.id, "ai-agents")
        .await
        .unwrap();
    let enrollment = app
        .storage
        .resolve()
        .enrollments
        .find_by_user_and_course(user.id, "ai-agents")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        OrderReference::parse(&initiated.order_id).map(|r| r.enrollment_id),
        Some(enrollment.id)
    );

    let payload = serde_json::to_vec(&serde_json::json!({
        "orderId": initiated.order_id,
        "transactionId": "txn-1",
        "result": "approved",
        "amount": "199.00"
    }))
    .unwrap();
    let signature = app.sign_webhook(&payload);

    let first = app
        .state
        .payment
        .confirm
        .execute(&payload, Some(&signature))
        .await
        .unwrap();
    let second = app
        .state
        .payment
        .confirm
        .execute(&payload, Some(&signature))
        .await
        .unwrap();

    assert_eq!(first, ConfirmPaymentOutcome::Granted);
    assert_eq!(second, ConfirmPaymentOutcome::Duplicate);
    let stored = app.enrollment(enrollment.id).await;
    assert!(stored.has_access);
    assert_eq!(stored.payment_id.as_deref(), Some("txn-1"));
    assert_eq!(stored.paid_amount, Some(19900));
    assert!(has_access(&app, user.id, "ai-agents").await);
}

#[actix_web::test]
async fn admin_sweep_verifies_idle_users_and_unlocks_their_enrollments() {
    let app = TestAppStateBuilder::default().build();
    app.signup("idle@x.com").await;
    let idle = app.find_user("idle@x.com").await;
    let locked = app
        .storage
        .resolve()
        .enrollments
        .create_enrollment(NewEnrollment {
            user_id: idle.id,
            course_id: "security-testing".to_string(),
            has_access: false,
            enrolled_at: app.now(),
        })
        .await
        .unwrap();

    app.clock.advance(Duration::days(3));
    let swept = app.state.auth.verify_inactive_users.execute().await.unwrap();

    assert_eq!(swept.verified_count, 1);
    assert!(app.find_user("idle@x.com").await.is_verified);
    assert!(app.enrollment(locked.id).await.has_access);
}

#[actix_web::test]
async fn admin_sweep_leaves_recently_active_users_alone() {
    let app = TestAppStateBuilder::default().build();
    app.signup("fresh@x.com").await;

    app.clock.advance(Duration::days(1));
    let swept = app.state.auth.verify_inactive_users.execute().await.unwrap();

    assert_eq!(swept.verified_count, 0);
    assert!(!app.find_user("fresh@x.com").await.is_verified);
}
