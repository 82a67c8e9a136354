// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::context::{CancellationToken, JobContext};
use crate::error::{JobError, Result};
use crate::health::{HealthState, JobHealth, LastRunSummary, SchedulerHealth};
use crate::job::Job;
use crate::tracker::RunTracker;
use crate::types::{JobRunRecord, JobStatus, TriggerSource};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

const RETRY_BASE_SECS: u64 = 1;
const RETRY_CAP_SECS: u64 = 60;
const RETRY_MULTIPLIER: f64 = 2.0;
const RETRY_LIMIT: u32 = 3;

struct ScheduledJob {
	job: Arc<dyn Job>,
	interval: Duration,
	cancel: CancellationToken,
}

/// Drives registered jobs on their intervals, retrying retryable
/// failures with exponential backoff. Run history stays in memory.
pub struct JobScheduler {
	jobs: HashMap<String, ScheduledJob>,
	runs: Arc<RunTracker>,
	shutdown_tx: broadcast::Sender<()>,
	handles: Mutex<Vec<JoinHandle<()>>>,
}

impl JobScheduler {
	pub fn new() -> Self {
		let (shutdown_tx, _) = broadcast::channel(1);
		Self {
			jobs: HashMap::new(),
			runs: Arc::new(RunTracker::new()),
			shutdown_tx,
			handles: Mutex::new(Vec::new()),
		}
	}

	pub fn add_periodic(&mut self, job: Arc<dyn Job>, interval: Duration) {
		let id = job.id().to_string();
		let scheduled = ScheduledJob {
			job,
			interval,
			cancel: CancellationToken::new(),
		};
		self.jobs.insert(id, scheduled);
	}

	/// Spawns the periodic loop for every registered job.
	pub async fn start(&self) {
		let mut handles = self.handles.lock().await;
		for (job_id, scheduled) in &self.jobs {
			handles.push(self.spawn_periodic(job_id.clone(), scheduled));
		}
		info!(jobs = handles.len(), "job scheduler running");
	}

	fn spawn_periodic(&self, job_id: String, scheduled: &ScheduledJob) -> JoinHandle<()> {
		let runner = JobRunner {
			job: Arc::clone(&scheduled.job),
			runs: Arc::clone(&self.runs),
		};
		let cancel = scheduled.cancel.clone();
		let interval = scheduled.interval;
		let mut stop_rx = self.shutdown_tx.subscribe();

		tokio::spawn(async move {
			loop {
				tokio::select! {
					_ = tokio::time::sleep(interval) => {
						if cancel.is_cancelled() {
							continue;
						}
						let _ = runner.run_once(TriggerSource::Schedule, &cancel).await;
					}
					_ = stop_rx.recv() => {
						info!(job_id = %job_id, "periodic loop stopping");
						break;
					}
				}
			}
		})
	}

	/// Runs a registered job right now, outside its schedule.
	#[instrument(skip(self))]
	pub async fn run_now(&self, job_id: &str, triggered_by: TriggerSource) -> Result<String> {
		let scheduled = self
			.jobs
			.get(job_id)
			.ok_or_else(|| JobError::NotFound(job_id.to_string()))?;

		let runner = JobRunner {
			job: Arc::clone(&scheduled.job),
			runs: Arc::clone(&self.runs),
		};
		runner.run_once(triggered_by, &scheduled.cancel).await
	}

	#[instrument(skip(self))]
	pub async fn cancel(&self, job_id: &str) -> Result<()> {
		let scheduled = self
			.jobs
			.get(job_id)
			.ok_or_else(|| JobError::NotFound(job_id.to_string()))?;

		scheduled.cancel.cancel();
		Ok(())
	}

	/// Stops the periodic loops and waits for them to wind down.
	#[instrument(skip(self))]
	pub async fn shutdown(&self) {
		let _ = self.shutdown_tx.send(());

		let mut handles = self.handles.lock().await;
		for handle in handles.drain(..) {
			let _ = handle.await;
		}

		info!("job scheduler stopped");
	}

	pub fn registered_ids(&self) -> Vec<String> {
		self.jobs.keys().cloned().collect()
	}

	pub async fn status_of(&self, job_id: &str) -> Option<JobHealth> {
		let scheduled = self.jobs.get(job_id)?;
		let last_run = self.runs.last_run(job_id).await;
		let consecutive_failures = self.runs.consecutive_failures(job_id).await;

		Some(JobHealth {
			job_id: job_id.to_string(),
			name: scheduled.job.name().to_string(),
			status: health_from_last_run(&last_run, consecutive_failures),
			last_run: last_run.map(|run| LastRunSummary {
				run_id: run.run_id,
				status: run.status,
				started_at: run.started_at,
				duration_ms: run.duration_ms,
				error: run.error_message,
			}),
			consecutive_failures,
		})
	}

	/// Per-job health plus the worst state across all of them.
	pub async fn health_report(&self) -> SchedulerHealth {
		let mut jobs = Vec::with_capacity(self.jobs.len());
		for job_id in self.jobs.keys() {
			if let Some(status) = self.status_of(job_id).await {
				jobs.push(status);
			}
		}

		let status = jobs
			.iter()
			.map(|job| job.status)
			.max()
			.unwrap_or(HealthState::Healthy);

		SchedulerHealth { status, jobs }
	}
}

impl Default for JobScheduler {
	fn default() -> Self {
		Self::new()
	}
}

/// A failed latest run degrades the job after one failure and marks it
/// unhealthy after three in a row. Anything else counts as healthy.
fn health_from_last_run(last_run: &Option<JobRunRecord>, consecutive_failures: u32) -> HealthState {
	let Some(run) = last_run else {
		return HealthState::Healthy;
	};
	if run.status != JobStatus::Failed {
		return HealthState::Healthy;
	}
	match consecutive_failures {
		0 => HealthState::Healthy,
		1..=2 => HealthState::Degraded,
		_ => HealthState::Unhealthy,
	}
}

/// One job plus the tracker it reports to.
struct JobRunner {
	job: Arc<dyn Job>,
	runs: Arc<RunTracker>,
}

impl JobRunner {
	/// Executes the job once, retrying retryable failures in place. The
	/// whole retry sequence shares a single run record.
	async fn run_once(&self, triggered_by: TriggerSource, cancel: &CancellationToken) -> Result<String> {
		let run_id = uuid::Uuid::new_v4().to_string();
		self.runs
			.record_run_start(JobRunRecord {
				run_id: run_id.clone(),
				job_id: self.job.id().to_string(),
				status: JobStatus::Running,
				started_at: Utc::now(),
				completed_at: None,
				duration_ms: None,
				error_message: None,
				retry_count: 0,
				triggered_by,
			})
			.await;

		let mut attempt = 0u32;
		loop {
			let ctx = JobContext {
				run_id: run_id.clone(),
				triggered_by: if attempt == 0 {
					triggered_by
				} else {
					TriggerSource::Retry
				},
				cancellation_token: cancel.clone(),
			};

			match self.job.run(&ctx).await {
				Ok(output) => {
					self.finish(JobStatus::Succeeded, None, attempt).await;
					info!(job_id = %self.job.id(), run_id = %run_id, message = %output.message, "job run complete");
					return Ok(run_id);
				}
				Err(JobError::Cancelled) => {
					self.finish(JobStatus::Cancelled, None, attempt).await;
					info!(job_id = %self.job.id(), run_id = %run_id, "job run cancelled");
					return Err(JobError::Cancelled);
				}
				Err(JobError::Failed { message, retryable }) if retryable && attempt < RETRY_LIMIT => {
					attempt += 1;
					let delay = retry_delay_secs(attempt);
					warn!(
						job_id = %self.job.id(),
						run_id = %run_id,
						attempt,
						delay,
						error = %message,
						"job attempt failed, retrying"
					);
					tokio::time::sleep(Duration::from_secs(delay)).await;
				}
				Err(JobError::Failed { message, retryable }) => {
					self.finish(JobStatus::Failed, Some(message.clone()), attempt).await;
					warn!(job_id = %self.job.id(), run_id = %run_id, error = %message, "job run failed");
					return Err(JobError::Failed { message, retryable });
				}
				Err(e) => {
					let message = e.to_string();
					self.finish(JobStatus::Failed, Some(message.clone()), attempt).await;
					warn!(job_id = %self.job.id(), run_id = %run_id, error = %message, "job run failed");
					return Err(e);
				}
			}
		}
	}

	async fn finish(&self, status: JobStatus, error: Option<String>, attempt: u32) {
		self.runs
			.record_run_complete(self.job.id(), status, error, attempt)
			.await;
	}
}

fn retry_delay_secs(attempt: u32) -> u64 {
	let delay = RETRY_BASE_SECS as f64 * RETRY_MULTIPLIER.powi(attempt as i32 - 1);
	(delay as u64).min(RETRY_CAP_SECS)
}
