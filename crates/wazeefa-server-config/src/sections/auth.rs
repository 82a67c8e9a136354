// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session lifetime, environment gating, and signup control.

use serde::Deserialize;

/// Resolved authentication settings.
#[derive(Debug, Clone)]
pub struct AuthConfig {
	/// Bypass authentication entirely. Development only; the loader
	/// refuses this in a production environment.
	pub dev_mode: bool,
	/// Deployment environment name ("development", "staging", "production").
	pub environment: String,
	/// Lifetime of newly issued sessions, in hours.
	pub session_ttl_hours: i64,
	/// Disable new registrations (existing users can still log in).
	pub signups_disabled: bool,
}

impl Default for AuthConfig {
	fn default() -> Self {
		Self {
			dev_mode: false,
			environment: "development".to_string(),
			session_ttl_hours: 720,
			signups_disabled: false,
		}
	}
}

/// Authentication overrides collected from a single source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfigLayer {
	pub dev_mode: Option<bool>,
	pub environment: Option<String>,
	pub session_ttl_hours: Option<i64>,
	pub signups_disabled: Option<bool>,
}

impl AuthConfigLayer {
	pub fn merge(&mut self, other: Self) {
		self.dev_mode = other.dev_mode.or(self.dev_mode.take());
		self.environment = other.environment.or(self.environment.take());
		self.session_ttl_hours = other.session_ttl_hours.or(self.session_ttl_hours.take());
		self.signups_disabled = other.signups_disabled.or(self.signups_disabled.take());
	}

	pub fn resolve(self) -> AuthConfig {
		let defaults = AuthConfig::default();
		AuthConfig {
			dev_mode: self.dev_mode.unwrap_or(defaults.dev_mode),
			environment: self.environment.unwrap_or(defaults.environment),
			session_ttl_hours: self.session_ttl_hours.unwrap_or(defaults.session_ttl_hours),
			signups_disabled: self.signups_disabled.unwrap_or(defaults.signups_disabled),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unset_layer_resolves_to_thirty_day_sessions() {
		let config = AuthConfigLayer::default().resolve();
		assert!(!config.dev_mode);
		assert_eq!(config.environment, "development");
		assert_eq!(config.session_ttl_hours, 720);
		assert!(!config.signups_disabled);
	}

	#[test]
	fn later_source_wins_field_by_field() {
		let mut base = AuthConfigLayer {
			dev_mode: Some(false),
			environment: Some("development".to_string()),
			..Default::default()
		};
		base.merge(AuthConfigLayer {
			environment: Some("staging".to_string()),
			session_ttl_hours: Some(48),
			..Default::default()
		});
		assert_eq!(base.dev_mode, Some(false));
		assert_eq!(base.environment.as_deref(), Some("staging"));
		assert_eq!(base.session_ttl_hours, Some(48));
	}
}
