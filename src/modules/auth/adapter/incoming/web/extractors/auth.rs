use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::modules::auth::application::ports::outgoing::SessionTokenError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Caller holding a valid session. Does not carry verification status;
/// handlers that gate on it read the current user record.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub is_admin: bool,
}

/// Caller holding a valid session for an admin account.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user_id: Uuid,
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

fn extract_token_from_header(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ActixError> {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        tracing::error!("AppState missing from request context");
        return Err(create_api_error(ApiResponse::internal_error()));
    };

    let Some(token) = extract_token_from_header(req) else {
        return Err(create_api_error(ApiResponse::unauthorized(
            "UNAUTHENTICATED",
            "Missing or invalid authorization header",
        )));
    };

    match state.sessions.verify(token) {
        Ok(claims) => Ok(AuthenticatedUser {
            user_id: claims.sub,
            is_admin: claims.is_admin,
        }),
        Err(SessionTokenError::Expired) => Err(create_api_error(ApiResponse::unauthorized(
            "UNAUTHENTICATED",
            "Session has expired",
        ))),
        Err(e) => {
            tracing::warn!(error = %e, "Rejected session token");
            Err(create_api_error(ApiResponse::unauthorized(
                "UNAUTHENTICATED",
                "Invalid session",
            )))
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

impl FromRequest for AdminUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = authenticate(req).and_then(|user| {
            if user.is_admin {
                Ok(AdminUser {
                    user_id: user.user_id,
                })
            } else {
                tracing::warn!(user_id = %user.user_id, "Non-admin attempted admin route");
                Err(create_api_error(ApiResponse::forbidden(
                    "FORBIDDEN",
                    "Admin access required",
                )))
            }
        });
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{get, http::StatusCode, test, App, HttpResponse, Responder};

    #[get("/whoami")]
    async fn whoami(user: AuthenticatedUser) -> impl Responder {
        HttpResponse::Ok().body(user.user_id.to_string())
    }

    #[get("/admin-only")]
    async fn admin_only(admin: AdminUser) -> impl Responder {
        HttpResponse::Ok().body(admin.user_id.to_string())
    }

    #[actix_web::test]
    async fn bearer_token_yields_user_id() {
        let app = TestAppStateBuilder::default().build();
        let srv = test::init_service(
            App::new()
                .app_data(app.state.clone())
                .service(whoami)
                .service(admin_only),
        )
        .await;
        let id = Uuid::new_v4();

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(app.bearer(id, false))
            .to_request();
        let resp = test::call_service(&srv, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, id.to_string());

        let req = test::TestRequest::get()
            .uri("/admin-only")
            .insert_header(app.bearer(id, false))
            .to_request();
        let resp = test::call_service(&srv, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri("/admin-only")
            .insert_header(app.bearer(id, true))
            .to_request();
        let resp = test::call_service(&srv, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn missing_scheme_is_unauthenticated() {
        let app = TestAppStateBuilder::default().build();
        let srv = test::init_service(App::new().app_data(app.state.clone()).service(whoami)).await;
        let (_, value) = app.bearer(Uuid::new_v4(), false);
        let raw = value.trim_start_matches("Bearer ").to_string();

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", raw))
            .to_request();
        let resp = test::call_service(&srv, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "UNAUTHENTICATED");
    }
}
