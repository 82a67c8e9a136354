// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Health reporting shapes consumed by the server's `/health` endpoint.

use crate::types::JobStatus;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Per-job health verdict. Variant order encodes severity, so the
/// worst of a set is simply its `max()`.
///
/// A job degrades on its first consecutive failure and goes unhealthy
/// at three; a job that has never run counts as healthy.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
	Healthy,
	Degraded,
	Unhealthy,
}

/// Health of a single registered job.
#[derive(Debug, Clone, Serialize)]
pub struct JobHealth {
	pub job_id: String,
	pub name: String,
	pub status: HealthState,
	pub last_run: Option<LastRunSummary>,
	pub consecutive_failures: u32,
}

/// Condensed view of the job's most recent run.
#[derive(Debug, Clone, Serialize)]
pub struct LastRunSummary {
	pub run_id: String,
	pub status: JobStatus,
	pub started_at: DateTime<Utc>,
	pub duration_ms: Option<i64>,
	pub error: Option<String>,
}

/// Rollup across every registered job. The worst job state wins.
#[derive(Debug, Clone, Serialize)]
pub struct SchedulerHealth {
	pub status: HealthState,
	pub jobs: Vec<JobHealth>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn severity_follows_variant_order() {
		assert!(HealthState::Healthy < HealthState::Degraded);
		assert!(HealthState::Degraded < HealthState::Unhealthy);
		assert_eq!(
			[HealthState::Degraded, HealthState::Healthy].into_iter().max(),
			Some(HealthState::Degraded)
		);
	}

	#[test]
	fn states_serialize_in_snake_case() {
		let json = serde_json::to_value(HealthState::Unhealthy).unwrap();
		assert_eq!(json, serde_json::json!("unhealthy"));
	}
}
