//! Health check endpoint handlers.
//!
//! Simple endpoints for monitoring and load balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// # HTTP Request
///
/// `GET [base]/health`
pub async fn health_handler(State(state): State<AppState>) -> Response {
    debug!("Processing health check request");

    let health_response = serde_json::json!({
        "status": "healthy",
        "backend": state.catalog().backend_name(),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    (StatusCode::OK, Json(health_response)).into_response()
}

/// Handler for the liveness probe.
///
/// # HTTP Request
///
/// `GET [base]/_liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Handler for the readiness probe. Runs a trivial query against the store.
///
/// # HTTP Request
///
/// `GET [base]/_readiness`
///
/// # Response
///
/// - `200 OK` - The store answers queries
/// - `503 Service Unavailable` - The store cannot be reached
pub async fn readiness_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    debug!("Processing readiness check request");

    state.catalog().health_check().await.map_err(|e| {
        warn!(error = %e, "Readiness check failed");
        ApiError::Unavailable {
            message: e.to_string(),
        }
    })?;

    let response = serde_json::json!({
        "status": "ready",
        "backend": state.catalog().backend_name(),
        "checks": {
            "storage": "ok"
        }
    });

    Ok((StatusCode::OK, Json(response)).into_response())
}
