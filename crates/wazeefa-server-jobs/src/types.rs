// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a single job run. Serialized in snake_case for the
/// health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
	Running,
	Succeeded,
	Failed,
	Cancelled,
}

/// What caused a run to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerSource {
	Schedule,
	Manual,
	Retry,
}

/// What a job reports back on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOutput {
	pub message: String,
	pub metadata: Option<serde_json::Value>,
}

/// The most recent run of a job, kept in memory by the scheduler.
#[derive(Debug, Clone, Serialize)]
pub struct JobRunRecord {
	pub run_id: String,
	pub job_id: String,
	pub status: JobStatus,
	pub started_at: DateTime<Utc>,
	pub completed_at: Option<DateTime<Utc>>,
	pub duration_ms: Option<i64>,
	pub error_message: Option<String>,
	pub retry_count: u32,
	pub triggered_by: TriggerSource,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_and_trigger_serialize_in_snake_case() {
		let status = serde_json::to_value(JobStatus::Succeeded).unwrap();
		assert_eq!(status, serde_json::json!("succeeded"));

		let trigger = serde_json::to_value(TriggerSource::Manual).unwrap();
		assert_eq!(trigger, serde_json::json!("manual"));
	}

	#[test]
	fn run_record_serializes_all_fields() {
		let record = JobRunRecord {
			run_id: "run-7".to_string(),
			job_id: "session-sweep".to_string(),
			status: JobStatus::Failed,
			started_at: Utc::now(),
			completed_at: Some(Utc::now()),
			duration_ms: Some(12),
			error_message: Some("database locked".to_string()),
			retry_count: 2,
			triggered_by: TriggerSource::Retry,
		};
		let value = serde_json::to_value(&record).unwrap();
		assert_eq!(value["status"], "failed");
		assert_eq!(value["triggered_by"], "retry");
		assert_eq!(value["retry_count"], 2);
		assert_eq!(value["error_message"], "database locked");
	}
}
