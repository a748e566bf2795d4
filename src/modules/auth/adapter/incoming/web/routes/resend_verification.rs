use actix_web::{post, web, Responder};
use tracing::{error, info, warn};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::auth::application::ports::incoming::use_cases::{
    ResendVerificationError, ResendVerificationOutput,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Resend the verification mail
///
/// Issues a fresh token; any earlier token stops working.
#[utoipa::path(
    post,
    path = "/api/auth/resend-verification",
    tag = "auth",
    responses(
        (status = 200, description = "New token issued", body = inline(SuccessResponse<ResendVerificationOutput>)),
        (
            status = 400,
            description = "Already verified",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "ALREADY_VERIFIED", "message": "Email is already verified" }
            })
        ),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 404, description = "Session user no longer exists", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
#[post("/api/auth/resend-verification")]
pub async fn resend_verification_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.auth.resend_verification.execute(user.user_id).await {
        Ok(output) => {
            info!(user_id = %user.user_id, email_sent = output.email_sent, "Verification token reissued");
            ApiResponse::success(output)
        }
        Err(ResendVerificationError::AlreadyVerified) => {
            warn!(user_id = %user.user_id, "Resend requested by verified user");
            ApiResponse::bad_request("ALREADY_VERIFIED", "Email is already verified")
        }
        Err(ResendVerificationError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(ResendVerificationError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, error = %e, "Failed to reissue verification token");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn resend_for_verified_user_is_rejected() {
        let app = TestAppStateBuilder::default().build();
        let user = app.create_user("a@x.com", true).await;
        let srv = test::init_service(
            App::new()
                .app_data(app.state.clone())
                .service(resend_verification_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/resend-verification")
            .insert_header(app.bearer(user.id, false))
            .to_request();
        let resp = test::call_service(&srv, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "ALREADY_VERIFIED");
    }

    #[actix_web::test]
    async fn resend_mails_a_new_token() {
        let app = TestAppStateBuilder::default().build();
        let first = app.signup("a@x.com").await;
        let user = app.find_user("a@x.com").await;
        let srv = test::init_service(
            App::new()
                .app_data(app.state.clone())
                .service(resend_verification_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/resend-verification")
            .insert_header(app.bearer(user.id, false))
            .to_request();
        let resp = test::call_service(&srv, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["emailSent"], true);
        let second = app.notifier.last_token_for("a@x.com").unwrap();
        assert_ne!(first, second);
    }
}
