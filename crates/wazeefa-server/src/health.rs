// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Probes behind the `/health` endpoint.
//!
//! One probe per component, each folded into a [`ComponentHealth`]; the
//! worst probe decides the overall verdict.

use std::time::Duration;

use axum::http::StatusCode;
use serde::Serialize;
use sqlx::sqlite::SqlitePool;
use tokio::time::timeout;
use utoipa::ToSchema;

use wazeefa_server_jobs::{HealthState, JobScheduler};

const DB_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Overall or per-component health verdict. Ord follows severity, so
/// the worst of a set is its `max()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
	Healthy,
	Degraded,
	Unhealthy,
}

impl HealthStatus {
	/// Degraded still answers 200 so load balancers keep routing; only
	/// Unhealthy takes the instance out of rotation.
	pub fn http_status(self) -> StatusCode {
		match self {
			HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
			HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
		}
	}
}

/// Outcome of probing a single component.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ComponentHealth {
	pub status: HealthStatus,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	pub duration_ms: u64,
}

/// Per-component breakdown reported by `/health`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthComponents {
	pub database: ComponentHealth,
	pub jobs: ComponentHealth,
}

impl HealthComponents {
	/// Worst component wins.
	pub fn overall(&self) -> HealthStatus {
		self.database.status.max(self.jobs.status)
	}
}

/// Top-level `/health` response body.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
	pub status: HealthStatus,
	pub timestamp: String,
	pub duration_ms: u64,
	pub version: String,
	pub components: HealthComponents,
}

/// Round-trip a trivial query, bounded so a wedged pool cannot hang the
/// endpoint.
pub async fn probe_database(pool: &SqlitePool) -> ComponentHealth {
	let start = std::time::Instant::now();
	let outcome = timeout(DB_PROBE_TIMEOUT, sqlx::query("SELECT 1").execute(pool)).await;
	let duration_ms = start.elapsed().as_millis() as u64;

	match outcome {
		Ok(Ok(_)) => ComponentHealth {
			status: HealthStatus::Healthy,
			message: None,
			duration_ms,
		},
		Ok(Err(e)) => ComponentHealth {
			status: HealthStatus::Unhealthy,
			message: Some(format!("database ping failed: {e}")),
			duration_ms,
		},
		Err(_) => ComponentHealth {
			status: HealthStatus::Unhealthy,
			message: Some("database ping timed out".to_string()),
			duration_ms,
		},
	}
}

/// Roll up the scheduler's per-job health. A portal running without its
/// scheduler serves traffic but cannot expire postings or prune
/// sessions, so that counts as degraded.
pub async fn probe_scheduler(scheduler: Option<&JobScheduler>) -> ComponentHealth {
	let start = std::time::Instant::now();
	let Some(scheduler) = scheduler else {
		return ComponentHealth {
			status: HealthStatus::Degraded,
			message: Some("job scheduler not running".to_string()),
			duration_ms: start.elapsed().as_millis() as u64,
		};
	};

	let report = scheduler.health_report().await;
	let failing: Vec<&str> = report
		.jobs
		.iter()
		.filter(|job| job.status != HealthState::Healthy)
		.map(|job| job.job_id.as_str())
		.collect();

	ComponentHealth {
		status: match report.status {
			HealthState::Healthy => HealthStatus::Healthy,
			HealthState::Degraded => HealthStatus::Degraded,
			HealthState::Unhealthy => HealthStatus::Unhealthy,
		},
		message: if failing.is_empty() {
			Some(format!("{} jobs registered", report.jobs.len()))
		} else {
			Some(format!("failing jobs: {}", failing.join(", ")))
		},
		duration_ms: start.elapsed().as_millis() as u64,
	}
}
