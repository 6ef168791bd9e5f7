//! Liveness endpoint with a repository round-trip

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::interfaces::http::modules::users::SharedUserService;

#[derive(Clone)]
pub struct HealthState {
    pub user_service: SharedUserService,
    pub started_at: Arc<Instant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Degraded,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub storage: StorageProbe,
}

/// Result of listing roles through the service
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StorageProbe {
    pub reachable: bool,
    pub roles: Option<u64>,
    pub latency_ms: Option<u64>,
    pub error: Option<String>,
}

async fn probe_storage(service: &SharedUserService) -> StorageProbe {
    let started = Instant::now();
    match service.list_roles().await {
        Ok(page) => StorageProbe {
            reachable: true,
            roles: Some(page.total),
            latency_ms: Some(started.elapsed().as_millis() as u64),
            error: None,
        },
        Err(e) => StorageProbe {
            reachable: false,
            roles: None,
            latency_ms: None,
            error: Some(e.message().to_string()),
        },
    }
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Repository reachable", body = HealthResponse),
        (status = 503, description = "Repository unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = probe_storage(&state.user_service).await;
    let (code, status) = if storage.reachable {
        (StatusCode::OK, HealthStatus::Ok)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, HealthStatus::Degraded)
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        storage,
    };
    (code, Json(body))
}
