//! Health check.

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::AppState;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    pub services: ServiceHealth,
}

/// Individual service health status
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceHealth {
    #[schema(example = "healthy")]
    pub database: String,
}

/// Health check endpoint with database connectivity check
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Database reachable", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match state.database.ping().await {
        Ok(()) => "healthy",
        Err(e) => {
            tracing::error!("Health check database ping failed: {}", e);
            "unhealthy"
        }
    };

    let healthy = database == "healthy";
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        services: ServiceHealth {
            database: database.to_string(),
        },
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
