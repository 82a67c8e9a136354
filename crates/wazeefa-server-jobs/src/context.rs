// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::types::TriggerSource;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Per-run context handed to [`Job::run`](crate::job::Job::run).
pub struct JobContext {
	/// Identifier of this run, shared across its retries.
	pub run_id: String,
	/// What started the run; retries report [`TriggerSource::Retry`].
	pub triggered_by: TriggerSource,
	pub cancellation_token: CancellationToken,
}

impl JobContext {
	/// Context for a standalone run with a fresh, uncancelled token.
	pub fn new(run_id: impl Into<String>, triggered_by: TriggerSource) -> Self {
		Self {
			run_id: run_id.into(),
			triggered_by,
			cancellation_token: CancellationToken::new(),
		}
	}
}

/// Cooperative cancellation flag shared between the scheduler and a
/// running job.
///
/// Clones all observe the same flag. Jobs poll
/// [`is_cancelled`](Self::is_cancelled) at safe points and bail out with
/// [`JobError::Cancelled`](crate::JobError::Cancelled) when it is set.
#[derive(Clone, Default)]
pub struct CancellationToken {
	cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn cancel(&self) {
		self.cancelled.store(true, Ordering::SeqCst);
	}

	pub fn is_cancelled(&self) -> bool {
		self.cancelled.load(Ordering::SeqCst)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fresh_token_is_not_cancelled() {
		assert!(!CancellationToken::new().is_cancelled());
	}

	#[test]
	fn cancel_reaches_every_clone() {
		let token = CancellationToken::new();
		let observer = token.clone();
		token.cancel();
		assert!(observer.is_cancelled());
	}
}
