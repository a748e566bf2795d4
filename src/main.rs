pub mod api;
pub mod config;
pub mod health;
pub mod modules;
pub mod shared;

pub use modules::auth;
pub use modules::course;
pub use modules::email;
pub use modules::enrollment;
pub use modules::grading;
pub use modules::payment;

use crate::api::openapi::ApiDoc;
use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtSessionService};
use crate::auth::application::auth_use_cases::AuthUseCases;
use crate::auth::application::domain::entities::AdminAllowList;
use crate::auth::application::ports::outgoing::SessionTokenProvider;
use crate::auth::application::services::{
    FetchProfileService, ResendVerificationService, SignInService, SignupService,
    VerifyEmailService, VerifyInactiveUsersService,
};
use crate::config::AppConfig;
use crate::course::application::course_use_cases::CourseUseCases;
use crate::course::application::services::CatalogService;
use crate::email::adapter::outgoing::{DisabledEmailSender, SmtpEmailSender};
use crate::email::application::ports::outgoing::{EmailSender, UserEmailNotifier};
use crate::email::application::services::UserEmailService;
use crate::enrollment::application::domain::policies::CompletionPolicy;
use crate::enrollment::application::enrollment_use_cases::EnrollmentUseCases;
use crate::enrollment::application::services::{
    CheckAccessService, CompleteCourseService, EnrollService, LessonProgressService,
    ListMyEnrollmentsService,
};
use crate::grading::application::grading_use_cases::GradingUseCases;
use crate::grading::application::services::{GradeSubmissionService, SubmissionService};
use crate::payment::adapter::outgoing::{HmacWebhookVerifier, HostedCheckoutGateway};
use crate::payment::application::payment_use_cases::PaymentUseCases;
use crate::payment::application::ports::outgoing::{PaymentGateway, WebhookVerifier};
use crate::payment::application::services::{ConfirmPaymentService, InitiatePaymentService};
use crate::shared::api::custom_json_config;
use crate::shared::clock::{Clock, SystemClock};
use crate::shared::storage::{DatabaseReadiness, Storage, StoreHandle};

use actix_web::{web, App, HttpServer};
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthUseCases,
    pub course: CourseUseCases,
    pub enrollment: EnrollmentUseCases,
    pub payment: PaymentUseCases,
    pub grading: GradingUseCases,
    pub storage: Storage,
    pub sessions: Arc<dyn SessionTokenProvider>,
}

/// Outbound collaborators and policies the use cases are built from.
pub struct AppDependencies {
    pub storage: Storage,
    pub sessions: Arc<dyn SessionTokenProvider>,
    pub notifier: Arc<dyn UserEmailNotifier>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub verifier: Arc<dyn WebhookVerifier>,
    pub clock: Arc<dyn Clock>,
    pub admins: AdminAllowList,
    pub completion_policy: CompletionPolicy,
}

pub fn build_app_state(deps: AppDependencies) -> AppState {
    let AppDependencies {
        storage,
        sessions,
        notifier,
        gateway,
        verifier,
        clock,
        admins,
        completion_policy,
    } = deps;

    let auth = AuthUseCases {
        signup: Arc::new(SignupService::new(
            storage.clone(),
            Arc::clone(&sessions),
            Arc::clone(&notifier),
            admins,
            Arc::clone(&clock),
        )),
        sign_in: Arc::new(SignInService::new(
            storage.clone(),
            Arc::clone(&sessions),
            Arc::clone(&clock),
        )),
        verify_email: Arc::new(VerifyEmailService::new(
            storage.clone(),
            Arc::clone(&notifier),
            Arc::clone(&clock),
        )),
        resend_verification: Arc::new(ResendVerificationService::new(
            storage.clone(),
            notifier,
            Arc::clone(&clock),
        )),
        fetch_profile: Arc::new(FetchProfileService::new(storage.clone())),
        verify_inactive_users: Arc::new(VerifyInactiveUsersService::new(
            storage.clone(),
            Arc::clone(&clock),
        )),
    };

    let catalog = Arc::new(CatalogService::new(storage.clone()));
    let course = CourseUseCases {
        list: catalog.clone(),
        get: catalog,
    };

    let lessons = Arc::new(LessonProgressService::new(storage.clone(), Arc::clone(&clock)));
    let enrollment = EnrollmentUseCases {
        enroll: Arc::new(EnrollService::new(storage.clone(), Arc::clone(&clock))),
        check_access: Arc::new(CheckAccessService::new(storage.clone(), Arc::clone(&clock))),
        complete_course: Arc::new(CompleteCourseService::new(
            storage.clone(),
            Arc::clone(&clock),
            completion_policy,
        )),
        list_mine: Arc::new(ListMyEnrollmentsService::new(storage.clone())),
        record_lesson: lessons.clone(),
        get_progress: lessons,
    };

    let payment = PaymentUseCases {
        initiate: Arc::new(InitiatePaymentService::new(
            storage.clone(),
            gateway,
            Arc::clone(&clock),
        )),
        confirm: Arc::new(ConfirmPaymentService::new(storage.clone(), verifier)),
    };

    let submissions = Arc::new(SubmissionService::new(storage.clone(), Arc::clone(&clock)));
    let grading = GradingUseCases {
        submit: submissions.clone(),
        list: submissions,
        grade: Arc::new(GradeSubmissionService::new(storage.clone(), clock)),
    };

    AppState {
        auth,
        course,
        enrollment,
        payment,
        grading,
        storage,
        sessions,
    }
}

/// Durable store when `DATABASE_URL` is set, fallback maps otherwise. The
/// connection is lazy so an unreachable database does not block start-up.
#[cfg(not(tarpaulin_include))]
async fn build_storage(config: &AppConfig) -> Storage {
    let Some(db_url) = config.database_url.clone() else {
        info!("DATABASE_URL not set; running on in-memory storage only");
        return Storage::memory_only();
    };

    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(20)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .connect_lazy(true)
        .sqlx_logging(false);

    match Database::connect(opt).await {
        Ok(conn) => {
            let db = Arc::new(conn);
            let readiness = Arc::new(DatabaseReadiness::new(Arc::clone(&db)));
            readiness.spawn_probe(config.db_probe_interval);
            Storage::new(Some(StoreHandle::postgres(db)), StoreHandle::in_memory(), readiness)
        }
        Err(e) => {
            tracing::error!(error = %e, "Invalid database configuration; using in-memory storage only");
            Storage::memory_only()
        }
    }
}

#[cfg(not(tarpaulin_include))]
fn build_email_sender(config: &AppConfig) -> Arc<dyn EmailSender> {
    let Some(smtp) = config.smtp.as_ref() else {
        tracing::warn!("SMTP is not configured; verification emails will not be delivered");
        return Arc::new(DisabledEmailSender);
    };

    match SmtpEmailSender::new(&smtp.server, &smtp.username, &smtp.password, &smtp.from_email) {
        Ok(sender) => Arc::new(sender),
        Err(e) => {
            tracing::error!(error = %e, "Failed to configure SMTP relay; email delivery disabled");
            Arc::new(DisabledEmailSender)
        }
    }
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Try .env.{environment} first, then fall back to .env
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    let storage = build_storage(&config).await;

    let sessions = Arc::new(JwtSessionService::new(JwtConfig::new(
        config.session_secret.clone(),
        config.session_ttl_secs,
    )));
    let notifier = Arc::new(UserEmailService::new(
        build_email_sender(&config),
        config.base_url.clone(),
    ));
    let gateway = HostedCheckoutGateway::new(config.checkout.clone())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    if config.checkout.store_id.is_empty() || config.checkout.api_token.is_empty() {
        tracing::warn!("Payment credentials are empty; checkout preload will be rejected by the gateway");
    }

    let state = build_app_state(AppDependencies {
        storage,
        sessions,
        notifier,
        gateway: Arc::new(gateway),
        verifier: Arc::new(HmacWebhookVerifier::new(config.webhook_secret.as_bytes())),
        clock: Arc::new(SystemClock),
        admins: config.admin_emails.clone(),
        completion_policy: config.completion_policy,
    });

    let server_url = config.server_url();
    info!(%server_url, mode = ?state.storage.mode(), "Server listening");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(custom_json_config())
            .configure(init_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(server_url)?
    .run()
    .await
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(crate::auth::adapter::incoming::web::routes::signup_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::sign_in_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::sign_out_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::me_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::verify_email_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::resend_verification_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::verify_inactive_users_handler);
    // Courses. `complete` is registered before `{course_id}` routes.
    cfg.service(crate::enrollment::adapter::incoming::web::routes::complete_course_handler);
    cfg.service(crate::course::adapter::incoming::web::routes::list_courses_handler);
    cfg.service(crate::course::adapter::incoming::web::routes::get_course_handler);
    // Enrollment
    cfg.service(crate::enrollment::adapter::incoming::web::routes::list_my_enrollments_handler);
    cfg.service(crate::enrollment::adapter::incoming::web::routes::enroll_handler);
    cfg.service(crate::enrollment::adapter::incoming::web::routes::check_access_handler);
    cfg.service(crate::enrollment::adapter::incoming::web::routes::record_lesson_progress_handler);
    cfg.service(crate::enrollment::adapter::incoming::web::routes::get_progress_handler);
    // Payment
    cfg.service(crate::payment::adapter::incoming::web::routes::initiate_payment_handler);
    cfg.service(crate::payment::adapter::incoming::web::routes::payment_webhook_handler);
    // Grading
    cfg.service(crate::grading::adapter::incoming::web::routes::create_submission_handler);
    cfg.service(crate::grading::adapter::incoming::web::routes::list_submissions_handler);
    cfg.service(crate::grading::adapter::incoming::web::routes::grade_submission_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
