use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;
use utoipa::ToSchema;

use crate::shared::storage::StorageMode;
use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    status: &'static str,
}

#[derive(Serialize, ToSchema)]
pub struct ReadinessResponse {
    /// `ok` on the durable store, `degraded` while serving from the fallback.
    #[schema(example = "ok")]
    status: &'static str,
    storage: StorageMode,
}

/// LIVENESS PROBE
/// - No I/O
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Process is up", body = HealthResponse))
)]
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

/// READINESS PROBE
/// - Reports which backend the next request would use
/// - Fallback still serves traffic, so this never answers 503
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses((status = 200, description = "Active storage backend", body = ReadinessResponse))
)]
#[get("/ready")]
pub async fn readiness(data: web::Data<AppState>) -> impl Responder {
    let storage = data.storage.mode();
    let status = match storage {
        StorageMode::Durable => "ok",
        StorageMode::Fallback => "degraded",
    };

    HttpResponse::Ok().json(ReadinessResponse { status, storage })
}
