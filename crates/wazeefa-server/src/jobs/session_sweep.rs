// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Background sweep that removes dead sessions.

use async_trait::async_trait;
use tracing::instrument;

use wazeefa_server_db::SessionRepository;
use wazeefa_server_jobs::{Job, JobContext, JobError, JobOutput};

/// Purges sessions whose expiry has passed. Live sessions are untouched,
/// so a sweep racing a login is harmless.
pub struct SessionSweepJob {
	session_repo: SessionRepository,
}

impl SessionSweepJob {
	pub fn new(session_repo: SessionRepository) -> Self {
		Self { session_repo }
	}
}

#[async_trait]
impl Job for SessionSweepJob {
	fn id(&self) -> &str {
		"session-sweep"
	}

	fn name(&self) -> &str {
		"Expired session sweep"
	}

	#[instrument(skip(self, ctx), fields(job_id = "session-sweep"))]
	async fn run(&self, ctx: &JobContext) -> Result<JobOutput, JobError> {
		if ctx.cancellation_token.is_cancelled() {
			return Err(JobError::Cancelled);
		}

		let purged = self
			.session_repo
			.purge_expired()
			.await
			.map_err(JobError::retryable)?;

		tracing::info!(purged, "session sweep finished");

		Ok(JobOutput {
			message: format!("purged {purged} expired sessions"),
			metadata: Some(serde_json::json!({ "purged": purged })),
		})
	}
}
