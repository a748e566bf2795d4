use actix_web::web::JsonConfig;

use crate::shared::api::ApiResponse;

/// Request bodies above this are refused before deserialization.
pub const MAX_JSON_BODY_BYTES: usize = 64 * 1024;

/// Unparseable or oversized bodies get the `VALIDATION_ERROR` envelope
/// instead of actix's plain-text 400.
pub fn custom_json_config() -> JsonConfig {
    JsonConfig::default()
        .limit(MAX_JSON_BODY_BYTES)
        .error_handler(|err, req| {
            let message = err.to_string();
            tracing::warn!(path = %req.path(), error = %message, "Rejected request body");
            actix_web::error::InternalError::from_response(
                err,
                ApiResponse::bad_request("VALIDATION_ERROR", &message),
            )
            .into()
        })
}
