// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory run tracking for health reporting.
//!
//! The scheduler keeps only the most recent run per job plus a
//! consecutive-failure counter; history does not survive a restart.

use std::collections::HashMap;
use tokio::sync::Mutex;

use chrono::Utc;

use crate::types::{JobRunRecord, JobStatus};

#[derive(Default)]
struct JobRunState {
	last_run: Option<JobRunRecord>,
	consecutive_failures: u32,
}

#[derive(Default)]
pub struct RunTracker {
	runs: Mutex<HashMap<String, JobRunState>>,
}

impl RunTracker {
	pub fn new() -> Self {
		Self::default()
	}

	/// Record a run entering the `Running` state.
	pub async fn record_run_start(&self, record: JobRunRecord) {
		let mut runs = self.runs.lock().await;
		let state = runs.entry(record.job_id.clone()).or_default();
		state.last_run = Some(record);
	}

	/// Record the final status of the current run.
	///
	/// A success resets the consecutive-failure counter; a failure bumps
	/// it; a cancellation leaves it alone.
	pub async fn record_run_complete(
		&self,
		job_id: &str,
		status: JobStatus,
		error_message: Option<String>,
		retry_count: u32,
	) {
		let mut runs = self.runs.lock().await;
		let Some(state) = runs.get_mut(job_id) else {
			return;
		};

		if let Some(run) = state.last_run.as_mut() {
			let completed = Utc::now();
			run.duration_ms = Some((completed - run.started_at).num_milliseconds());
			run.completed_at = Some(completed);
			run.status = status;
			run.error_message = error_message;
			run.retry_count = retry_count;
		}

		match status {
			JobStatus::Succeeded => state.consecutive_failures = 0,
			JobStatus::Failed => state.consecutive_failures += 1,
			JobStatus::Running | JobStatus::Cancelled => {}
		}
	}

	pub async fn last_run(&self, job_id: &str) -> Option<JobRunRecord> {
		let runs = self.runs.lock().await;
		runs.get(job_id).and_then(|state| state.last_run.clone())
	}

	pub async fn consecutive_failures(&self, job_id: &str) -> u32 {
		let runs = self.runs.lock().await;
		runs.get(job_id)
			.map(|state| state.consecutive_failures)
			.unwrap_or(0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::TriggerSource;

	fn make_record(job_id: &str, run_id: &str) -> JobRunRecord {
		JobRunRecord {
			run_id: run_id.to_string(),
			job_id: job_id.to_string(),
			status: JobStatus::Running,
			started_at: Utc::now(),
			completed_at: None,
			duration_ms: None,
			error_message: None,
			retry_count: 0,
			triggered_by: TriggerSource::Schedule,
		}
	}

	#[tokio::test]
	async fn test_success_resets_consecutive_failures() {
		let tracker = RunTracker::new();

		tracker.record_run_start(make_record("job-a", "run-1")).await;
		tracker
			.record_run_complete("job-a", JobStatus::Failed, Some("boom".to_string()), 0)
			.await;
		tracker.record_run_start(make_record("job-a", "run-2")).await;
		tracker
			.record_run_complete("job-a", JobStatus::Failed, Some("boom".to_string()), 0)
			.await;
		assert_eq!(tracker.consecutive_failures("job-a").await, 2);

		tracker.record_run_start(make_record("job-a", "run-3")).await;
		tracker
			.record_run_complete("job-a", JobStatus::Succeeded, None, 0)
			.await;
		assert_eq!(tracker.consecutive_failures("job-a").await, 0);

		let last = tracker.last_run("job-a").await.unwrap();
		assert_eq!(last.run_id, "run-3");
		assert_eq!(last.status, JobStatus::Succeeded);
		assert!(last.completed_at.is_some());
		assert!(last.duration_ms.is_some());
	}

	#[tokio::test]
	async fn test_cancellation_leaves_failure_count_alone() {
		let tracker = RunTracker::new();

		tracker.record_run_start(make_record("job-a", "run-1")).await;
		tracker
			.record_run_complete("job-a", JobStatus::Failed, Some("boom".to_string()), 0)
			.await;
		tracker.record_run_start(make_record("job-a", "run-2")).await;
		tracker
			.record_run_complete("job-a", JobStatus::Cancelled, None, 0)
			.await;

		assert_eq!(tracker.consecutive_failures("job-a").await, 1);
		assert_eq!(
			tracker.last_run("job-a").await.unwrap().status,
			JobStatus::Cancelled
		);
	}

	#[tokio::test]
	async fn test_jobs_are_tracked_independently() {
		let tracker = RunTracker::new();

		tracker.record_run_start(make_record("job-a", "run-1")).await;
		tracker
			.record_run_complete("job-a", JobStatus::Failed, Some("boom".to_string()), 0)
			.await;

		assert_eq!(tracker.consecutive_failures("job-a").await, 1);
		assert_eq!(tracker.consecutive_failures("job-b").await, 0);
		assert!(tracker.last_run("job-b").await.is_none());
	}
}
