use actix_web::{post, Responder};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;

#[derive(Serialize, ToSchema)]
pub struct SignOutResponse {
    #[schema(example = "Signed out")]
    pub message: String,
}

/// Sign out
///
/// Sessions are stateless bearer tokens; the client discards its token and
/// it lapses at expiry.
#[utoipa::path(
    post,
    path = "/api/auth/signout",
    tag = "auth",
    responses(
        (status = 200, description = "Signed out", body = inline(SuccessResponse<SignOutResponse>)),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
#[post("/api/auth/signout")]
pub async fn sign_out_handler(user: AuthenticatedUser) -> impl Responder {
    info!(user_id = %user.user_id, "User signed out");
    ApiResponse::success(SignOutResponse {
        message: "Signed out".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{http::StatusCode, test, App};
    use uuid::Uuid;

    #[actix_web::test]
    async fn sign_out_requires_session() {
        let app = TestAppStateBuilder::default().build();
        let srv = test::init_service(
            App::new()
                .app_data(app.state.clone())
                .service(sign_out_handler),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/auth/signout").to_request();
        let resp = test::call_service(&srv, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/api/auth/signout")
            .insert_header(app.bearer(Uuid::new_v4(), false))
            .to_request();
        let resp = test::call_service(&srv, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
