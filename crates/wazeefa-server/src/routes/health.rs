// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Health check endpoint.

use axum::{extract::State, response::IntoResponse, Json};

use crate::{
	api::AppState,
	health::{self, HealthComponents, HealthResponse},
};

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy or degraded", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    ),
    tag = "health"
)]
/// GET /health - Liveness and component status.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	let started = std::time::Instant::now();

	let (database, jobs) = tokio::join!(
		health::probe_database(&state.pool),
		health::probe_scheduler(state.job_scheduler.as_deref()),
	);

	let components = HealthComponents { database, jobs };
	let status = components.overall();

	let body = HealthResponse {
		status,
		timestamp: chrono::Utc::now().to_rfc3339(),
		duration_ms: started.elapsed().as_millis() as u64,
		version: crate::version::VERSION.to_string(),
		components,
	};

	(status.http_status(), Json(body))
}
