// src/api/schemas.rs
use serde::Serialize;
use utoipa::ToSchema;

/// Envelope for every successful JSON response.
#[derive(Serialize, ToSchema)]
#[serde(bound = "T: Serialize")]
pub struct SuccessResponse<T> {
    #[schema(example = true)]
    pub success: bool,
    pub data: T,
}

/// Envelope for every JSON error. The verify page is HTML and does not use it.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    pub error: ErrorDetail,
}

/// `code` is stable and machine readable; `message` is for people.
///
/// Codes in use: `VALIDATION_ERROR`, `UNAUTHENTICATED`, `FORBIDDEN`,
/// `VERIFICATION_REQUIRED`, `USER_NOT_FOUND`, `ALREADY_VERIFIED`,
/// `COURSE_NOT_FOUND`, `COURSE_IS_FREE`, `ALREADY_HAS_ACCESS`,
/// `ENROLLMENT_NOT_FOUND`, `ALREADY_COMPLETED`, `SUBMISSION_NOT_FOUND`,
/// `INVALID_GRADE`, `INVALID_SIGNATURE`, `INTERNAL_ERROR`.
#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    #[schema(example = "VERIFICATION_REQUIRED")]
    pub code: String,

    #[schema(example = "Please verify your email to access course content")]
    pub message: String,
}
