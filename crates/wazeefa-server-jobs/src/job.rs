// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::context::JobContext;
use crate::error::JobError;
use crate::types::JobOutput;

/// A unit of background work the scheduler can run.
///
/// Implementations hold whatever repositories they need and perform one
/// sweep per [`run`](Self::run) call. Long-running work should poll
/// `ctx.cancellation_token` and bail out with [`JobError::Cancelled`].
#[async_trait]
pub trait Job: Send + Sync {
	/// Stable identifier, used for registration and health reporting.
	fn id(&self) -> &str;

	/// Human-readable name.
	fn name(&self) -> &str;

	async fn run(&self, ctx: &JobContext) -> std::result::Result<JobOutput, JobError>;
}
