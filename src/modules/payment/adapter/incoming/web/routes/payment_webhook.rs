use actix_web::{post, web, HttpRequest, Responder};
use serde::Serialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::payment::application::ports::incoming::use_cases::ConfirmPaymentError;
use crate::shared::api::ApiResponse;
use crate::AppState;

pub const SIGNATURE_HEADER: &str = "X-Webhook-Signature";

#[derive(Serialize, ToSchema)]
pub struct WebhookAck {
    pub received: bool,
}

/// Payment gateway notification
///
/// The body is authenticated with a hex HMAC-SHA256 in `X-Webhook-Signature`
/// before anything in it is read. Authentic notifications are always
/// acknowledged, including duplicates and non-approved results.
#[utoipa::path(
    post,
    path = "/api/payments/webhook",
    tag = "payments",
    request_body(
        content = String,
        content_type = "application/json",
        description = "Gateway payload: {orderId, result, transactionId?, amount?}; transactionId and amount are required when approved"
    ),
    params(("X-Webhook-Signature" = String, Header, description = "Lowercase hex HMAC-SHA256 of the raw body")),
    responses(
        (
            status = 200,
            description = "Acknowledged",
            body = inline(SuccessResponse<WebhookAck>),
            example = json!({ "success": true, "data": { "received": true } })
        ),
        (status = 400, description = "Authentic but malformed payload", body = ErrorResponse),
        (
            status = 401,
            description = "Signature missing or wrong",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "INVALID_SIGNATURE", "message": "Invalid webhook signature" }
            })
        ),
    )
)]
#[post("/api/payments/webhook")]
pub async fn payment_webhook_handler(
    req: HttpRequest,
    body: web::Bytes,
    data: web::Data<AppState>,
) -> impl Responder {
    let signature = req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    match data.payment.confirm.execute(&body, signature).await {
        Ok(outcome) => {
            info!(?outcome, "Payment webhook processed");
            ApiResponse::success(WebhookAck { received: true })
        }
        Err(ConfirmPaymentError::InvalidSignature) => {
            warn!(has_signature = signature.is_some(), "Payment webhook rejected: bad signature");
            ApiResponse::unauthorized("INVALID_SIGNATURE", "Invalid webhook signature")
        }
        Err(ConfirmPaymentError::MalformedPayload(msg)) => {
            warn!(reason = %msg, "Payment webhook payload malformed");
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }
        Err(ConfirmPaymentError::RepositoryError(e)) => {
            error!(error = %e, "Payment webhook failed");
            ApiResponse::internal_error()
        }
    }
}
