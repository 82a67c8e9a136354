// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobError {
	/// The run observed its cancellation token and stopped early.
	#[error("run cancelled before completion")]
	Cancelled,

	/// The run failed; `retryable` controls whether the scheduler retries
	/// with backoff.
	#[error("run failed: {message}")]
	Failed { message: String, retryable: bool },

	/// No job registered under this id.
	#[error("no job registered as {0:?}")]
	NotFound(String),
}

impl JobError {
	/// Wrap a repository failure as a run failure the scheduler may retry.
	pub fn retryable(err: impl std::fmt::Display) -> Self {
		JobError::Failed {
			message: err.to_string(),
			retryable: true,
		}
	}
}

pub type Result<T> = std::result::Result<T, JobError>;
