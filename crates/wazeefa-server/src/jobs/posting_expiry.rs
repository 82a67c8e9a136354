// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Background sweep that closes postings past their deadline.

use async_trait::async_trait;
use tracing::instrument;

use wazeefa_server_db::PostingRepository;
use wazeefa_server_jobs::{Job, JobContext, JobError, JobOutput};

/// Closes open postings whose `closes_at` deadline has passed, so they
/// stop accepting applications without employer intervention.
pub struct PostingExpiryJob {
	posting_repo: PostingRepository,
}

impl PostingExpiryJob {
	pub fn new(posting_repo: PostingRepository) -> Self {
		Self { posting_repo }
	}
}

#[async_trait]
impl Job for PostingExpiryJob {
	fn id(&self) -> &str {
		"posting-expiry"
	}

	fn name(&self) -> &str {
		"Posting deadline sweep"
	}

	#[instrument(skip(self, ctx), fields(job_id = "posting-expiry"))]
	async fn run(&self, ctx: &JobContext) -> Result<JobOutput, JobError> {
		if ctx.cancellation_token.is_cancelled() {
			return Err(JobError::Cancelled);
		}

		let closed = self
			.posting_repo
			.close_expired()
			.await
			.map_err(JobError::retryable)?;

		tracing::info!(closed, "posting sweep finished");

		Ok(JobOutput {
			message: format!("closed {closed} overdue postings"),
			metadata: Some(serde_json::json!({ "closed": closed })),
		})
	}
}
