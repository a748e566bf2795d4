use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::application::ports::incoming::use_cases::{SignInError, SignInOutput};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct SignInRequestDto {
    #[schema(example = "a@x.com")]
    pub email: String,
}

/// Sign in by email
///
/// Identity is email only; no credential is checked.
#[utoipa::path(
    post,
    path = "/api/auth/signin",
    tag = "auth",
    request_body = SignInRequestDto,
    responses(
        (status = 200, description = "Signed in", body = inline(SuccessResponse<SignInOutput>)),
        (
            status = 404,
            description = "No account for this email",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "USER_NOT_FOUND", "message": "User not found" }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/signin")]
pub async fn sign_in_handler(
    req: web::Json<SignInRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let email = req.into_inner().email.trim().to_string();
    info!(email = %email, "Sign-in attempt");

    match data.auth.sign_in.execute(&email).await {
        Ok(output) => {
            info!(user_id = %output.user.id, "User signed in");
            ApiResponse::success(output)
        }
        Err(SignInError::UserNotFound) => {
            warn!(email = %email, "Sign-in failed: unknown email");
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(SignInError::SessionError(e)) => {
            error!(error = %e, "Session issue failed during sign-in");
            ApiResponse::internal_error()
        }
        Err(SignInError::RepositoryError(e)) => {
            error!(error = %e, "Repository error during sign-in");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::ports::outgoing::SessionTokenProvider;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn sign_in_returns_session_for_known_email() {
        let app = TestAppStateBuilder::default().build();
        let user = app.create_user("a@x.com", true).await;
        let srv = test::init_service(
            App::new()
                .app_data(app.state.clone())
                .service(sign_in_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/signin")
            .set_json(serde_json::json!({ "email": "a@x.com" }))
            .to_request();
        let resp = test::call_service(&srv, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["user"]["id"], user.id.to_string());
        let token = body["data"]["sessionToken"].as_str().unwrap();
        let claims = app.sessions.verify(token).unwrap();
        assert_eq!(claims.sub, user.id);
    }

    #[actix_web::test]
    async fn sign_in_with_unknown_email_is_not_found() {
        let app = TestAppStateBuilder::default().build();
        let srv = test::init_service(
            App::new()
                .app_data(app.state.clone())
                .service(sign_in_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/signin")
            .set_json(serde_json::json!({ "email": "ghost@x.com" }))
            .to_request();
        let resp = test::call_service(&srv, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "USER_NOT_FOUND");
    }
}
