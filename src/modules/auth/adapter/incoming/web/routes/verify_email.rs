use actix_web::{get, http::StatusCode, web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::IntoParams;

use crate::modules::auth::application::ports::incoming::use_cases::VerifyEmailError;
use crate::AppState;

#[derive(Deserialize, IntoParams)]
pub struct VerifyEmailQuery {
    /// Token from the verification mail
    pub token: String,
}

const VERIFIED_PAGE: &str = "<!DOCTYPE html>\
<html><head><meta charset=\"utf-8\"><title>Email verified</title></head>\
<body><h1>Email verified</h1>\
<p>Your account is active. Any courses you enrolled in are now unlocked.</p>\
<p><a href=\"/\">Continue</a></p></body></html>";

const INVALID_TOKEN_PAGE: &str = "<!DOCTYPE html>\
<html><head><meta charset=\"utf-8\"><title>Verification failed</title></head>\
<body><h1>Verification link invalid or expired</h1>\
<p>Sign in and request a new verification email.</p>\
<p><a href=\"/\">Back</a></p></body></html>";

const ERROR_PAGE: &str = "<!DOCTYPE html>\
<html><head><meta charset=\"utf-8\"><title>Verification failed</title></head>\
<body><h1>Something went wrong</h1>\
<p>Please try the link again later.</p></body></html>";

fn html(status: StatusCode, body: &'static str) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// Verify an email address
///
/// Reached from the emailed link in a browser, so every outcome is an HTML
/// page. Unknown, used and expired tokens render the same failure page.
#[utoipa::path(
    get,
    path = "/api/auth/verify",
    tag = "auth",
    params(VerifyEmailQuery),
    responses(
        (status = 200, description = "Verified", content_type = "text/html"),
        (status = 400, description = "Invalid or expired token", content_type = "text/html"),
        (status = 500, description = "Internal server error", content_type = "text/html"),
    )
)]
#[get("/api/auth/verify")]
pub async fn verify_email_handler(
    query: web::Query<VerifyEmailQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.auth.verify_email.execute(&query.token).await {
        Ok(profile) => {
            info!(user_id = %profile.id, "Email verified");
            html(StatusCode::OK, VERIFIED_PAGE)
        }
        Err(VerifyEmailError::InvalidOrExpiredToken) => {
            warn!("Verification attempted with invalid or expired token");
            html(StatusCode::BAD_REQUEST, INVALID_TOKEN_PAGE)
        }
        Err(VerifyEmailError::RepositoryError(e)) => {
            error!(error = %e, "Repository error during verification");
            html(StatusCode::INTERNAL_SERVER_ERROR, ERROR_PAGE)
        }
    }
}
