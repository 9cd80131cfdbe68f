use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::infrastructure::db::{check_connection, DbPool};
use crate::infrastructure::repositories::{HealthCheckRepository, HealthStatus};

pub const DATABASE_COMPONENT: &str = "database";

pub struct HealthState {
    pool: Arc<DbPool>,
    health_repo: Arc<HealthCheckRepository>,
    content_provider_configured: bool,
}

impl HealthState {
    pub fn new(
        pool: Arc<DbPool>,
        health_repo: Arc<HealthCheckRepository>,
        content_provider_configured: bool,
    ) -> Self {
        Self {
            pool,
            health_repo,
            content_provider_configured,
        }
    }
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    let content_provider = if state.content_provider_configured {
        "configured"
    } else {
        "not_configured"
    };

    match check_connection(&state.pool).await {
        Ok(_) => {
            if let Err(e) = state
                .health_repo
                .record(
                    DATABASE_COMPONENT,
                    HealthStatus::Healthy,
                    json!({ "content_provider": content_provider }),
                )
                .await
            {
                tracing::warn!(error = %e, "Failed to record health check");
            }

            (
                StatusCode::OK,
                Json(json!({
                    "status": "ready",
                    "database": "connected",
                    "content_provider": content_provider
                })),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Database readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "database": "disconnected",
                    "content_provider": content_provider
                })),
            )
        }
    }
}
