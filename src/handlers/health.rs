use actix_web::HttpResponse;

use super::HealthResponse;

#[utoipa::path(
    get,
    path = "/health",
    summary = "Health check",
    description = "Always 200 once the service is listening. The database was reached during startup; it is not probed again here.",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    ),
    tag = "health"
)]
/// Health check endpoint
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
    })
}
