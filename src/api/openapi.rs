use crate::api::schemas::{ErrorDetail, ErrorResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::auth::adapter::incoming::web::routes::{
    SignInRequestDto, SignOutResponse, SignupRequestDto,
};
use crate::auth::application::domain::entities::UserProfile;
use crate::auth::application::ports::incoming::use_cases::{
    resend_verification::ResendVerificationOutput, verify_inactive_users::VerifyInactiveUsersOutput,
    SignInOutput, SignupOutput,
};
use crate::course::application::domain::entities::Course;
use crate::enrollment::adapter::incoming::web::routes::{
    CompleteCourseRequestDto, EnrollRequestDto, LessonCompleteRequestDto,
};
use crate::enrollment::application::domain::entities::{Enrollment, LessonProgress};
use crate::enrollment::application::ports::incoming::use_cases::{
    AccessCheckOutput, CompleteCourseOutput, EnrollOutput,
};
use crate::grading::adapter::incoming::web::routes::{
    CreateSubmissionRequestDto, GradeSubmissionRequestDto,
};
use crate::grading::application::domain::entities::Submission;
use crate::health::{HealthResponse, ReadinessResponse};
use crate::payment::adapter::incoming::web::routes::{InitiatePaymentRequestDto, WebhookAck};
use crate::payment::application::ports::incoming::use_cases::InitiatePaymentOutput;
use crate::shared::storage::StorageMode;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Course Platform API",
        version = "1.0.0",
        description = "Accounts, enrollment, payment and grading for the course platform",
        contact(
            name = "API Support",
            email = "support@example.com"
        )
    ),
    paths(
        // Health
        crate::health::health,
        crate::health::readiness,

        // Auth endpoints
        crate::auth::adapter::incoming::web::routes::signup_handler,
        crate::auth::adapter::incoming::web::routes::sign_in_handler,
        crate::auth::adapter::incoming::web::routes::sign_out_handler,
        crate::auth::adapter::incoming::web::routes::me_handler,
        crate::auth::adapter::incoming::web::routes::verify_email_handler,
        crate::auth::adapter::incoming::web::routes::resend_verification_handler,
        crate::auth::adapter::incoming::web::routes::verify_inactive_users_handler,

        // Catalog endpoints
        crate::course::adapter::incoming::web::routes::list_courses_handler,
        crate::course::adapter::incoming::web::routes::get_course_handler,

        // Enrollment endpoints
        crate::enrollment::adapter::incoming::web::routes::enroll_handler,
        crate::enrollment::adapter::incoming::web::routes::list_my_enrollments_handler,
        crate::enrollment::adapter::incoming::web::routes::check_access_handler,
        crate::enrollment::adapter::incoming::web::routes::complete_course_handler,
        crate::enrollment::adapter::incoming::web::routes::record_lesson_progress_handler,
        crate::enrollment::adapter::incoming::web::routes::get_progress_handler,

        // Payment endpoints
        crate::payment::adapter::incoming::web::routes::initiate_payment_handler,
        crate::payment::adapter::incoming::web::routes::payment_webhook_handler,

        // Grading endpoints
        crate::grading::adapter::incoming::web::routes::create_submission_handler,
        crate::grading::adapter::incoming::web::routes::list_submissions_handler,
        crate::grading::adapter::incoming::web::routes::grade_submission_handler,
    ),
    components(
        schemas(
            // Response wrappers
            ErrorResponse,
            ErrorDetail,
            HealthResponse,
            ReadinessResponse,
            StorageMode,

            // Auth
            SignupRequestDto,
            SignInRequestDto,
            SignOutResponse,
            SignupOutput,
            SignInOutput,
            ResendVerificationOutput,
            VerifyInactiveUsersOutput,
            UserProfile,

            // Catalog and enrollment
            Course,
            Enrollment,
            LessonProgress,
            EnrollRequestDto,
            EnrollOutput,
            AccessCheckOutput,
            CompleteCourseRequestDto,
            CompleteCourseOutput,
            LessonCompleteRequestDto,

            // Payment
            InitiatePaymentRequestDto,
            InitiatePaymentOutput,
            WebhookAck,

            // Grading
            Submission,
            CreateSubmissionRequestDto,
            GradeSubmissionRequestDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Liveness and readiness probes"),
        (name = "auth", description = "Signup, sessions and email verification"),
        (name = "admin", description = "Administrative maintenance"),
        (name = "courses", description = "Course catalog"),
        (name = "enrollments", description = "Enrollment, access and progress"),
        (name = "payments", description = "Hosted checkout and payment webhook"),
        (name = "grading", description = "Project submissions and grades"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token from signup or signin"))
                        .build(),
                ),
            )
        }
    }
}
