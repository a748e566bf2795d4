use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::payment::application::ports::incoming::use_cases::{
    InitiatePaymentError, InitiatePaymentOutput,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InitiatePaymentRequestDto {
    #[schema(example = "ai-agents")]
    pub course_id: String,
}

fn map_initiate_error(e: InitiatePaymentError) -> actix_web::HttpResponse {
    match e {
        InitiatePaymentError::CourseNotFound => {
            ApiResponse::not_found("COURSE_NOT_FOUND", "Course not found")
        }
        InitiatePaymentError::UserNotFound => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        InitiatePaymentError::CourseIsFree => {
            ApiResponse::bad_request("COURSE_IS_FREE", "This course is free; enroll directly")
        }
        InitiatePaymentError::AlreadyHasAccess => {
            ApiResponse::bad_request("ALREADY_HAS_ACCESS", "You already have access to this course")
        }
        InitiatePaymentError::PaymentInitFailed(msg) => {
            warn!(error = %msg, "Payment initialization failed");
            ApiResponse::error(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "PAYMENT_INIT_FAILED",
                "Payment service unavailable, please try again later",
            )
        }
        InitiatePaymentError::RepositoryError(msg) => {
            error!(error = %msg, "Repository error during payment initialization");
            ApiResponse::internal_error()
        }
    }
}

/// Start a hosted checkout
///
/// Returns the gateway ticket the client uses to open the checkout page.
#[utoipa::path(
    post,
    path = "/api/payments/initiate",
    tag = "payments",
    request_body = InitiatePaymentRequestDto,
    responses(
        (
            status = 200,
            description = "Checkout ticket issued",
            body = inline(SuccessResponse<InitiatePaymentOutput>),
            example = json!({
                "success": true,
                "data": {
                    "ticket": "1612345678abcdef",
                    "orderId": "ord-0b6c1f0e2f7c4a439d552b1f7f3c9a10-1767225600123",
                    "amount": "199.00",
                    "courseTitle": "AI Coding Agents"
                }
            })
        ),
        (status = 400, description = "Course is free or access already held", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 404, description = "Unknown course", body = ErrorResponse),
        (
            status = 500,
            description = "Gateway failure",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "PAYMENT_INIT_FAILED",
                    "message": "Payment service unavailable, please try again later"
                }
            })
        ),
    ),
    security(("bearer_auth" = []))
)]
#[post("/api/payments/initiate")]
pub async fn initiate_payment_handler(
    user: AuthenticatedUser,
    req: web::Json<InitiatePaymentRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let course_id = req.into_inner().course_id;

    match data.payment.initiate.execute(user.user_id, &course_id).await {
        Ok(output) => ApiResponse::success(output),
        Err(e) => map_initiate_error(e),
    }
}
