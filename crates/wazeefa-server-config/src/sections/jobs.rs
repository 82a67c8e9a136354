// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Sweep intervals for the background jobs.

use serde::Deserialize;

/// Resolved background-job settings.
#[derive(Debug, Clone)]
pub struct JobsConfig {
	/// How often expired sessions are purged.
	pub session_sweep_interval_secs: u64,
	/// How often postings past their closing date are closed.
	pub posting_expiry_interval_secs: u64,
}

impl Default for JobsConfig {
	fn default() -> Self {
		Self {
			session_sweep_interval_secs: 3600,
			posting_expiry_interval_secs: 1800,
		}
	}
}

/// Job overrides collected from a single source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobsConfigLayer {
	pub session_sweep_interval_secs: Option<u64>,
	pub posting_expiry_interval_secs: Option<u64>,
}

impl JobsConfigLayer {
	pub fn merge(&mut self, other: Self) {
		self.session_sweep_interval_secs = other
			.session_sweep_interval_secs
			.or(self.session_sweep_interval_secs.take());
		self.posting_expiry_interval_secs = other
			.posting_expiry_interval_secs
			.or(self.posting_expiry_interval_secs.take());
	}

	pub fn resolve(self) -> JobsConfig {
		let defaults = JobsConfig::default();
		JobsConfig {
			session_sweep_interval_secs: self
				.session_sweep_interval_secs
				.unwrap_or(defaults.session_sweep_interval_secs),
			posting_expiry_interval_secs: self
				.posting_expiry_interval_secs
				.unwrap_or(defaults.posting_expiry_interval_secs),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unset_layer_resolves_to_hourly_and_half_hourly() {
		let config = JobsConfigLayer::default().resolve();
		assert_eq!(config.session_sweep_interval_secs, 3600);
		assert_eq!(config.posting_expiry_interval_secs, 1800);
	}

	#[test]
	fn later_source_wins_where_it_is_set() {
		let mut base = JobsConfigLayer {
			session_sweep_interval_secs: Some(3600),
			posting_expiry_interval_secs: None,
		};
		base.merge(JobsConfigLayer {
			session_sweep_interval_secs: Some(600),
			posting_expiry_interval_secs: None,
		});
		assert_eq!(base.session_sweep_interval_secs, Some(600));
		assert!(base.posting_expiry_interval_secs.is_none());
	}

	#[test]
	fn partial_toml_leaves_the_rest_unset() {
		let layer: JobsConfigLayer = toml::from_str("session_sweep_interval_secs = 120").unwrap();
		assert_eq!(layer.session_sweep_interval_secs, Some(120));
		assert!(layer.posting_expiry_interval_secs.is_none());
	}
}
